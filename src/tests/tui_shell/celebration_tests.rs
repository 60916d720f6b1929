use super::*;

fn area() -> Rect {
    Rect::new(0, 0, 60, 9)
}

#[test]
fn idle_celebration_draws_nothing() {
    let c = Celebration::new(Duration::from_millis(1500));
    let now = Instant::now();
    assert_eq!(c.progress(now), None);
    assert_eq!(c.scale(now), 1.0);
    assert!(c.particles(now, area()).is_empty());
}

#[test]
fn pulse_peaks_halfway_and_settles() {
    let mut c = Celebration::new(Duration::from_millis(1500));
    let t0 = Instant::now();
    c.restart(t0, 1);
    assert_eq!(c.scale(t0), 1.0);
    let peak = c.scale(t0 + PULSE / 2);
    assert!((peak - 1.5).abs() < 1e-3, "peak was {peak}");
    assert_eq!(c.scale(t0 + PULSE), 1.0);
    assert!(c.is_playing(t0 + PULSE));
}

#[test]
fn burst_finishes_after_duration() {
    let mut c = Celebration::new(Duration::from_millis(1000));
    let t0 = Instant::now();
    c.restart(t0, 7);
    let mid = c.progress(t0 + Duration::from_millis(250)).unwrap();
    assert!((mid - 0.25).abs() < 1e-3);
    assert!(!c.particles(t0 + Duration::from_millis(100), area()).is_empty());
    assert_eq!(c.progress(t0 + Duration::from_millis(1000)), None);
    assert!(c.particles(t0 + Duration::from_millis(1000), area()).is_empty());
}

#[test]
fn restart_replays_from_the_beginning() {
    let mut c = Celebration::new(Duration::from_millis(1000));
    let t0 = Instant::now();
    c.restart(t0, 1);
    let t1 = t0 + Duration::from_millis(900);
    c.restart(t1, 2);
    assert_eq!(c.progress(t1), Some(0.0));
    assert!(c.is_playing(t0 + Duration::from_millis(1500)));
}

#[test]
fn stop_ends_playback() {
    let mut c = Celebration::new(Duration::from_millis(1000));
    let t0 = Instant::now();
    c.restart(t0, 3);
    c.stop();
    assert!(!c.is_playing(t0));
}

#[test]
fn particles_stay_inside_the_area() {
    let mut c = Celebration::new(Duration::from_millis(1500));
    let t0 = Instant::now();
    c.restart(t0, 42);
    let a = Rect::new(5, 3, 40, 7);
    for ms in (0..1500).step_by(50) {
        for p in c.particles(t0 + Duration::from_millis(ms), a) {
            assert!(p.x >= a.x && p.x < a.x + a.width);
            assert!(p.y >= a.y && p.y < a.y + a.height);
        }
    }
}

#[test]
fn short_durations_still_cover_the_pulse() {
    let mut c = Celebration::new(Duration::from_millis(10));
    let t0 = Instant::now();
    c.restart(t0, 0);
    assert!(c.is_playing(t0 + Duration::from_millis(400)));
}
