mod tests {
    use mood_lamp_core::command::{Command, parse_request, request_text};
    use mood_lamp_core::{Brightness, FixtureId, RawColor};

    fn parse(request: &str) -> Vec<Command> {
        parse_request(request).iter().copied().collect()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("GET /on HTTP/1.1\r\nHost: lamp\r\n\r\n"), [Command::On]);
        assert_eq!(parse("GET /off HTTP/1.1\r\n"), [Command::Off]);
        assert_eq!(parse("GET /rainbow?state=on HTTP/1.1\r\n"), [Command::Rainbow]);
    }

    #[test]
    fn test_unknown_paths_are_ignored() {
        assert!(parse("GET / HTTP/1.1\r\n").is_empty());
        assert!(parse("GET /favicon.ico HTTP/1.1\r\n").is_empty());
        assert!(parse("GET /online HTTP/1.1\r\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_rainbow_requires_state_on() {
        assert!(parse("GET /rainbow?state=off HTTP/1.1").is_empty());
        assert!(parse("GET /rainbow HTTP/1.1").is_empty());
    }

    #[test]
    fn test_brightness_is_remapped_and_clamped() {
        assert_eq!(
            parse("GET /brightness?value=255 HTTP/1.1"),
            [Command::SetBrightness(Brightness::FULL)]
        );
        assert_eq!(
            parse("GET /brightness?value=0 HTTP/1.1"),
            [Command::SetBrightness(Brightness::OFF)]
        );
        assert_eq!(
            parse("GET /brightness?value=999 HTTP/1.1"),
            [Command::SetBrightness(Brightness::FULL)]
        );
        assert_eq!(
            parse("GET /brightness?value=-4 HTTP/1.1"),
            [Command::SetBrightness(Brightness::OFF)]
        );
        assert_eq!(
            parse("GET /brightness?value=51 HTTP/1.1"),
            [Command::SetBrightness(Brightness::from_level(51))]
        );
    }

    #[test]
    fn test_malformed_brightness_is_dropped() {
        assert!(parse("GET /brightness?value=abc HTTP/1.1").is_empty());
        assert!(parse("GET /brightness?value= HTTP/1.1").is_empty());
        assert!(parse("GET /brightness HTTP/1.1").is_empty());
    }

    #[test]
    fn test_color_keys_in_any_order() {
        assert_eq!(
            parse("GET /color2?b=3&r=1&g=2 HTTP/1.1"),
            [Command::SetColor {
                fixture: FixtureId::Two,
                color: RawColor::new(1, 2, 3),
            }]
        );
    }

    #[test]
    fn test_color_channels_are_not_clamped() {
        assert_eq!(
            parse("GET /color1?r=300&g=0&b=-5 HTTP/1.1"),
            [Command::SetColor {
                fixture: FixtureId::One,
                color: RawColor::new(300, 0, -5),
            }]
        );
    }

    #[test]
    fn test_malformed_color_is_dropped() {
        assert!(parse("GET /color3?r=1&g=2 HTTP/1.1").is_empty());
        assert!(parse("GET /color3?r=1&g=x&b=3 HTTP/1.1").is_empty());
        assert!(parse("GET /color4?r=1&g=2&b=3 HTTP/1.1").is_empty());
    }

    #[test]
    fn test_multiple_commands_in_fixed_order() {
        assert_eq!(
            parse("GET /rainbow?state=on/on HTTP/1.1"),
            [Command::On, Command::Rainbow]
        );
        assert_eq!(
            parse("GET /color3?r=1&g=1&b=1/brightness?value=255 HTTP/1.1"),
            [
                Command::SetBrightness(Brightness::FULL),
                Command::SetColor {
                    fixture: FixtureId::Three,
                    color: RawColor::new(1, 1, 1),
                },
            ]
        );
    }

    #[test]
    fn test_bad_token_does_not_drop_others() {
        assert_eq!(
            parse("GET /brightness?value=oops/off HTTP/1.1"),
            [Command::Off]
        );
    }

    #[test]
    fn test_request_text_keeps_valid_prefix() {
        assert_eq!(request_text(b"GET /on"), "GET /on");
        assert_eq!(request_text(b"GET /on\xff\xfe"), "GET /on");
    }
}
