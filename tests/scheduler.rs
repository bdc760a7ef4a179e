mod common;

mod tests {
    use mood_lamp_core::{
        Brightness, Duration, FixtureId, Gesture, LampConfig, LampParts, LampScheduler, Mode,
        RawColor, RequestSlot, ServoId, ServoOutput, TickReport,
    };

    use super::common::{BLACK, MaxRng, MockServo, MockStrip, MockTouch, PIXELS, at, fixtures};

    type TestScheduler<'a> =
        LampScheduler<MockStrip, MockServo, MockTouch, &'a RequestSlot, MaxRng, PIXELS>;

    fn scheduler(slot: &RequestSlot) -> TestScheduler<'_> {
        let parts = LampParts {
            fixtures: fixtures(),
            servo_drivers: [MockServo::default(), MockServo::default()],
            touch: MockTouch::default(),
            listener: slot,
            rng: MaxRng,
        };
        LampScheduler::new(parts, &LampConfig::DEFAULT)
    }

    fn set_touch(scheduler: &mut TestScheduler<'_>, pressed: bool) {
        scheduler.touch_mut().pressed = pressed;
    }

    /// Tick every 10 ms in `[from, to)`, returning the last report
    fn run(scheduler: &mut TestScheduler<'_>, from: u64, to: u64) -> Option<TickReport> {
        let mut last = None;
        let mut now = from;
        while now < to {
            last = Some(scheduler.tick(at(now)));
            now += 10;
        }
        last
    }

    fn custom(color: RawColor) -> [mood_lamp_core::Rgb; PIXELS] {
        [Brightness::DEFAULT.apply(color.saturate()); PIXELS]
    }

    #[test]
    fn test_idle_tick() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);

        let report = scheduler.tick(at(0));
        assert_eq!(report.gesture, None);
        assert!(!report.serviced);
        assert_eq!(report.commands, 0);
        assert_eq!(report.sleep_duration, Duration::from_millis(10));
        assert_eq!(scheduler.lamp().mode(), Mode::Off);

        // Servos start at rest and are released right away
        assert_eq!(report.servos, [ServoOutput::Release; 2]);
        let report = scheduler.tick(at(10));
        assert_eq!(report.servos, [ServoOutput::Idle; 2]);
        assert_eq!(scheduler.servo_driver(ServoId::A).releases, 1);
    }

    #[test]
    fn test_tap_from_touch() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);

        set_touch(&mut scheduler, true);
        assert_eq!(scheduler.tick(at(0)).gesture, None);
        set_touch(&mut scheduler, false);
        let report = scheduler.tick(at(120));

        assert_eq!(report.gesture, Some(Gesture::Tap));
        assert_eq!(scheduler.lamp().mode(), Mode::Static { color_index: 0 });
        // Targets set by the tap are eased within the same tick
        assert!(matches!(report.servos[0], ServoOutput::Duty(_)));
        assert!(matches!(report.servos[1], ServoOutput::Duty(_)));
        assert!(scheduler.servo_driver(ServoId::A).duty.is_some());
        assert!(scheduler.lamp().servo(ServoId::A).current() > 0.0);
    }

    #[test]
    fn test_hold_turns_off_and_releases() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);
        slot.offer(b"GET /on HTTP/1.1").unwrap();
        run(&mut scheduler, 0, 1000);
        assert!(scheduler.lamp().servo(ServoId::A).current() > 0.0);

        set_touch(&mut scheduler, true);
        let mut holds = 0;
        let mut now = 1000;
        while now <= 3500 {
            if scheduler.tick(at(now)).gesture == Some(Gesture::Hold) {
                holds += 1;
                assert_eq!(now, 3000);
            }
            now += 10;
        }
        assert_eq!(holds, 1);
        assert_eq!(scheduler.lamp().mode(), Mode::Off);

        set_touch(&mut scheduler, false);
        assert_eq!(scheduler.tick(at(3510)).gesture, None);

        run(&mut scheduler, 3520, 8000);
        let servo = scheduler.servo_driver(ServoId::A);
        assert_eq!(servo.releases, 2);
        assert_eq!(servo.duty, None);
        assert!(scheduler.lamp().servo(ServoId::A).is_released());
        assert!(scheduler.lamp().servo(ServoId::B).is_released());
    }

    #[test]
    fn test_command_from_slot() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);
        slot.offer(b"GET /color1?r=10&g=20&b=30 HTTP/1.1\r\nHost: lamp\r\n\r\n")
            .unwrap();

        let report = scheduler.tick(at(0));
        assert!(report.serviced);
        assert_eq!(report.commands, 1);
        assert!(!slot.is_pending());

        let lamp = scheduler.lamp();
        assert_eq!(lamp.mode(), Mode::Static { color_index: 0 });
        let color = RawColor::new(10, 20, 30);
        assert_eq!(lamp.fixture(FixtureId::One).pixels(), &custom(color));
        assert_eq!(lamp.fixture(FixtureId::Three).pixels(), &[BLACK; PIXELS]);
    }

    #[test]
    fn test_command_target_eases_next_tick() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);
        slot.offer(b"GET /color1?r=255&g=255&b=255").unwrap();

        scheduler.tick(at(0));
        let servo = scheduler.lamp().servo(ServoId::A);
        assert_eq!(servo.current(), 0.0);
        assert!(servo.target() > 0.0);

        let report = scheduler.tick(at(10));
        assert!(matches!(report.servos[0], ServoOutput::Duty(_)));
        assert!(scheduler.lamp().servo(ServoId::A).current() > 0.0);
    }

    #[test]
    fn test_unrecognized_request_is_serviced() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);
        slot.offer(b"GET /status HTTP/1.1").unwrap();

        let report = scheduler.tick(at(0));
        assert!(report.serviced);
        assert_eq!(report.commands, 0);
        assert_eq!(scheduler.lamp().mode(), Mode::Off);
    }

    #[test]
    fn test_one_request_per_tick() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);
        slot.offer(b"GET /on").unwrap();
        assert!(slot.offer(b"GET /off").is_err());

        assert!(scheduler.tick(at(0)).serviced);
        assert!(!scheduler.tick(at(10)).serviced);

        slot.offer(b"GET /off").unwrap();
        assert!(scheduler.tick(at(20)).serviced);
        assert_eq!(scheduler.lamp().mode(), Mode::Off);
    }

    #[test]
    fn test_gesture_applies_before_command() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);

        set_touch(&mut scheduler, true);
        scheduler.tick(at(0));
        set_touch(&mut scheduler, false);
        slot.offer(b"GET /rainbow?state=on").unwrap();

        let report = scheduler.tick(at(100));
        assert_eq!(report.gesture, Some(Gesture::Tap));
        assert_eq!(report.commands, 1);
        assert_eq!(scheduler.lamp().mode(), Mode::Rainbow);
    }

    #[test]
    fn test_rainbow_runs_between_requests() {
        let slot = RequestSlot::new();
        let mut scheduler = scheduler(&slot);
        slot.offer(b"GET /rainbow?state=on").unwrap();
        scheduler.tick(at(0));
        assert_eq!(scheduler.lamp().mode(), Mode::Rainbow);

        run(&mut scheduler, 10, 2000);
        let rainbow = scheduler.lamp().rainbow();
        assert!(rainbow.fade().progress() > 30);
        assert!(rainbow.sweep(ServoId::A).phase() > 0.0);
        assert!(rainbow.sweep(ServoId::B).phase() < 0.0);
        assert!(scheduler.lamp().servo(ServoId::A).current() >= 60.0);
    }
}
