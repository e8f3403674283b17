mod tests {
    use scatter_clock::bounds::DIGIT_GROUPS;
    use scatter_clock::color::{GREEN, OFF, RED, Rgb, YELLOW};
    use scatter_clock::settings::{FORMAT_SLOT, MODE_SLOT};
    use scatter_clock::{
        Button, Buttons, Clock, ClockConfig, ClockError, ClockEvent, Duration, EventChannel,
        EventReceiver, Instant, ModeId, OutputDriver, SettingsStore, TimeFormat, TimeSource,
        TimeSourceError, WallTime,
    };

    struct FakeRtc {
        time: WallTime,
        present: bool,
    }

    impl FakeRtc {
        fn at(hour: u8, minute: u8, second: u8) -> Self {
            Self {
                time: WallTime::new(hour, minute, second),
                present: true,
            }
        }
    }

    impl TimeSource for FakeRtc {
        fn probe(&mut self) -> Result<(), TimeSourceError> {
            if self.present { Ok(()) } else { Err(TimeSourceError) }
        }

        fn now(&mut self) -> WallTime {
            self.time
        }

        fn set(&mut self, time: WallTime) {
            self.time = time;
        }
    }

    #[derive(Default)]
    struct FakeStrip {
        writes: usize,
        brightness: Option<u8>,
    }

    impl OutputDriver for FakeStrip {
        fn write(&mut self, _colors: &[Rgb]) {
            self.writes += 1;
        }

        fn set_brightness(&mut self, brightness: u8) {
            self.brightness = Some(brightness);
        }
    }

    struct FakeEeprom([u8; 2]);

    impl FakeEeprom {
        fn with(mode: u8, format: TimeFormat) -> Self {
            let mut bytes = [0; 2];
            bytes[usize::from(MODE_SLOT)] = mode;
            bytes[usize::from(FORMAT_SLOT)] = format.to_stored();
            Self(bytes)
        }

        fn byte(&self, slot: u8) -> u8 {
            self.0[usize::from(slot)]
        }
    }

    impl SettingsStore for FakeEeprom {
        fn read_byte(&mut self, slot: u8) -> u8 {
            self.0[usize::from(slot)]
        }

        fn write_byte(&mut self, slot: u8, value: u8) {
            self.0[usize::from(slot)] = value;
        }
    }

    #[derive(Default)]
    struct Panel {
        pressed: [bool; Button::COUNT],
    }

    impl Panel {
        fn hold(&mut self, button: Button, pressed: bool) {
            self.pressed[button as usize] = pressed;
        }
    }

    impl Buttons for Panel {
        fn is_pressed(&mut self, button: Button) -> bool {
            self.pressed[button as usize]
        }
    }

    type TestClock<'a> = Clock<'a, FakeRtc, FakeStrip, FakeEeprom, 32>;

    fn build<'a>(
        rtc: FakeRtc,
        eeprom: FakeEeprom,
        events: &'a EventChannel<32>,
    ) -> TestClock<'a> {
        Clock::new(
            rtc,
            FakeStrip::default(),
            eeprom,
            events.sender(),
            &ClockConfig::default(),
            Instant::from_millis(0),
        )
        .unwrap()
    }

    /// Poll until the running transition has finished
    fn settle(clock: &mut TestClock<'_>, panel: &mut Panel, mut now: Instant) -> Instant {
        loop {
            let result = clock.poll(now, panel);
            now += result.sleep_duration.max(Duration::from_millis(1));
            if !clock.renderer().is_transitioning() {
                return now;
            }
        }
    }

    /// Press and release a button, letting any resulting transition finish
    fn press(clock: &mut TestClock<'_>, panel: &mut Panel, button: Button, now: Instant) -> Instant {
        panel.hold(button, true);
        clock.poll(now, panel);
        let now = settle(clock, panel, now + Duration::from_millis(50));
        panel.hold(button, false);
        clock.poll(now, panel);
        settle(clock, panel, now + Duration::from_millis(50))
    }

    fn drain<const N: usize>(receiver: EventReceiver<'_, N>) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_receive() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_missing_time_source_is_fatal() {
        let events = EventChannel::<32>::new();
        let rtc = FakeRtc {
            present: false,
            ..FakeRtc::at(10, 0, 0)
        };
        let result = Clock::new(
            rtc,
            FakeStrip::default(),
            FakeEeprom::with(1, TimeFormat::H24),
            events.sender(),
            &ClockConfig::default(),
            Instant::from_millis(0),
        );
        assert_eq!(result.err(), Some(ClockError::TimeSourceUnavailable));
    }

    #[test]
    fn test_start_applies_brightness_and_clamps_mode() {
        let events = EventChannel::<32>::new();
        let clock = build(FakeRtc::at(9, 30, 0), FakeEeprom::with(9, TimeFormat::H24), &events);
        assert_eq!(clock.renderer().output().brightness, Some(ClockConfig::default().brightness));
        assert_eq!(clock.status().mode, ModeId::FastChase);
        assert_eq!(clock.status().rotation, 3);
    }

    #[test]
    fn test_first_pass_renders_twelve_hour_time() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(14, 7, 0), FakeEeprom::with(4, TimeFormat::H12), &events);

        settle(&mut clock, &mut panel, Instant::from_millis(0));
        assert_eq!(clock.status().displayed, Some((2, 7)));
        assert_eq!(clock.renderer().output().writes, 16);

        let mask = clock.renderer().current_mask();
        let counts: Vec<usize> = DIGIT_GROUPS.iter().map(|group| mask.lit_in(*group)).collect();
        assert_eq!(counts, [0, 2, 0, 7]);
        assert!(drain(events.receiver()).contains(&ClockEvent::Redrawn { hour: 2, minute: 7 }));
    }

    #[test]
    fn test_palette_colors_at_rotation_zero() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(18, 7, 0), FakeEeprom::with(4, TimeFormat::H24), &events);
        settle(&mut clock, &mut panel, Instant::from_millis(0));
        assert_eq!(clock.status().rotation, 0);

        let frame = clock.renderer().frame();
        let mask = clock.renderer().current_mask();
        for (group, expected) in [(0, RED), (1, GREEN), (3, YELLOW)] {
            for index in DIGIT_GROUPS[group].range() {
                let want = if mask.is_lit(index) { expected } else { OFF };
                assert_eq!(frame[index], want, "element {index}");
            }
        }
        assert_eq!(mask.lit_in(DIGIT_GROUPS[2]), 0);
    }

    #[test]
    fn test_minute_buttons_wrap_and_zero_seconds() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(10, 59, 30), FakeEeprom::with(5, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));

        let now = press(&mut clock, &mut panel, Button::MinuteUp, now);
        assert_eq!(clock.time_source().time, WallTime::new(10, 0, 0));
        assert_eq!(clock.status().displayed, Some((10, 0)));

        clock.time_source_mut().time = WallTime::new(10, 0, 45);
        press(&mut clock, &mut panel, Button::MinuteDown, now);
        assert_eq!(clock.time_source().time, WallTime::new(10, 59, 0));
    }

    #[test]
    fn test_hour_buttons_wrap_and_keep_seconds() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(23, 15, 42), FakeEeprom::with(5, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));

        let now = press(&mut clock, &mut panel, Button::HourUp, now);
        assert_eq!(clock.time_source().time, WallTime::new(0, 15, 42));
        assert_eq!(clock.status().displayed, Some((0, 15)));

        press(&mut clock, &mut panel, Button::HourDown, now);
        assert_eq!(clock.time_source().time, WallTime::new(23, 15, 42));
        assert!(
            drain(events.receiver())
                .contains(&ClockEvent::TimeAdjusted(WallTime::new(0, 15, 42)))
        );
    }

    #[test]
    fn test_mode_cycle_persists_and_wraps() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(8, 0, 0), FakeEeprom::with(4, TimeFormat::H24), &events);
        let mut now = settle(&mut clock, &mut panel, Instant::from_millis(0));

        now = press(&mut clock, &mut panel, Button::ModeCycle, now);
        assert_eq!(clock.status().mode, ModeId::Roles);
        assert_eq!(clock.store().byte(MODE_SLOT), 5);

        now = press(&mut clock, &mut panel, Button::ModeCycle, now);
        assert_eq!(clock.status().mode, ModeId::FastChase);
        assert_eq!(clock.store().byte(MODE_SLOT), 1);

        for _ in 0..5 {
            now = press(&mut clock, &mut panel, Button::ModeCycle, now);
        }
        assert_eq!(clock.status().mode, ModeId::FastChase);
        assert!(drain(events.receiver()).contains(&ClockEvent::ModeChanged(ModeId::Roles)));
    }

    #[test]
    fn test_long_press_toggles_format() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(15, 20, 0), FakeEeprom::with(4, TimeFormat::H24), &events);
        let mut now = settle(&mut clock, &mut panel, Instant::from_millis(0));

        panel.hold(Button::HourUp, true);
        panel.hold(Button::HourDown, true);
        let released_at = now + Duration::from_millis(12_000);
        while now < released_at {
            now = settle(&mut clock, &mut panel, now);
        }
        panel.hold(Button::HourUp, false);
        panel.hold(Button::HourDown, false);

        assert_eq!(clock.status().format, TimeFormat::H12);
        assert_eq!(clock.store().byte(FORMAT_SLOT), 0);
        // Both single presses fired (+1 then -1), leaving the hour unchanged
        assert_eq!(clock.time_source().time.hour, 15);
        assert_eq!(clock.status().displayed, Some((3, 20)));

        let toggles = drain(events.receiver())
            .into_iter()
            .filter(|event| matches!(event, ClockEvent::FormatChanged(_)))
            .count();
        assert_eq!(toggles, 1);
    }

    #[test]
    fn test_hour_crossing_rotates_palette() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(10, 59, 0), FakeEeprom::with(4, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));
        assert_eq!(clock.status().rotation, 4);

        clock.time_source_mut().time = WallTime::new(11, 0, 0);
        settle(&mut clock, &mut panel, now);
        assert_eq!(clock.status().rotation, 5);
        assert_eq!(clock.status().displayed, Some((11, 0)));
        assert!(drain(events.receiver()).contains(&ClockEvent::PaletteRotated(5)));
    }

    #[test]
    fn test_hour_crossing_shows_rotation_only_through_fade() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(10, 59, 0), FakeEeprom::with(5, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));
        let writes = clock.renderer().output().writes;

        clock.time_source_mut().time = WallTime::new(11, 0, 0);
        settle(&mut clock, &mut panel, now);
        assert_eq!(clock.renderer().output().writes, writes + 16);
        assert_eq!(clock.status().rotation, 5);
    }

    #[test]
    fn test_hour_crossing_ignored_by_chase_modes() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(10, 59, 0), FakeEeprom::with(2, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));

        clock.time_source_mut().time = WallTime::new(11, 0, 0);
        settle(&mut clock, &mut panel, now);
        assert_eq!(clock.status().rotation, 4);
    }

    #[test]
    fn test_chase_ticks_refresh_without_redraw() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(12, 34, 0), FakeEeprom::with(1, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));
        let mask = *clock.renderer().current_mask();
        let writes = clock.renderer().output().writes;

        clock.poll(now + Duration::from_millis(100), &mut panel);
        assert_eq!(clock.renderer().output().writes, writes + 1);
        assert_eq!(*clock.renderer().current_mask(), mask);
        assert!(!clock.renderer().is_transitioning());
    }

    #[test]
    fn test_palette_mode_never_ticks() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(12, 34, 0), FakeEeprom::with(4, TimeFormat::H24), &events);
        let now = settle(&mut clock, &mut panel, Instant::from_millis(0));
        let writes = clock.renderer().output().writes;

        for ms in (0..10_000).step_by(100) {
            clock.poll(now + Duration::from_millis(ms), &mut panel);
        }
        assert_eq!(clock.renderer().output().writes, writes);
    }

    #[test]
    fn test_buttons_wait_for_transition() {
        let events = EventChannel::<32>::new();
        let mut panel = Panel::default();
        let mut clock = build(FakeRtc::at(7, 45, 0), FakeEeprom::with(4, TimeFormat::H24), &events);

        panel.hold(Button::ModeCycle, true);
        clock.poll(Instant::from_millis(0), &mut panel);
        assert!(clock.renderer().is_transitioning());
        clock.poll(Instant::from_millis(80), &mut panel);
        assert_eq!(clock.status().mode, ModeId::Palette);

        let now = settle(&mut clock, &mut panel, Instant::from_millis(80));
        clock.poll(now, &mut panel);
        assert_eq!(clock.status().mode, ModeId::Roles);
    }
}
