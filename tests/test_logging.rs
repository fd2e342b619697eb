use tile_platformer::logging::{init, verbose_requested};

#[test]
fn verbose_switch_values() {
    assert!(!verbose_requested(None));
    assert!(!verbose_requested(Some("")));
    assert!(!verbose_requested(Some("0")));
    assert!(!verbose_requested(Some("FALSE")));
    assert!(verbose_requested(Some("1")));
    assert!(verbose_requested(Some(" yes ")));
}

#[test]
fn init_can_run_twice() {
    init(true);
    init(false);
}
