use crate::knob::{Bounds, Point, PointerEvent};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Pointer(PointerEvent),
    SetDefault(f64),
    ConfigReload,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected} arguments, got {found}")]
    Arity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

fn numbers<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[f64; N], ParseEventError> {
    if args.len() != N {
        return Err(ParseEventError::Arity {
            command,
            expected: N,
            found: args.len(),
        });
    }

    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseEventError::InvalidNumber(arg.to_string()))?;
    }
    Ok(out)
}

/// Parses one line of the input protocol:
///
/// ```text
/// down <left> <top> <width> <height>
/// move <x> <y>
/// up
/// leave
/// default <value>
/// quit
/// ```
impl FromStr for AppEvent {
    type Err = ParseEventError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let event = match command.as_str() {
            "down" => {
                let [left, top, width, height] = numbers("down", &args)?;
                AppEvent::Pointer(PointerEvent::Down(Bounds::new(left, top, width, height)))
            }
            "move" => {
                let [x, y] = numbers("move", &args)?;
                AppEvent::Pointer(PointerEvent::Move(Point::new(x, y)))
            }
            "up" => {
                numbers::<0>("up", &args)?;
                AppEvent::Pointer(PointerEvent::Up)
            }
            "leave" => {
                numbers::<0>("leave", &args)?;
                AppEvent::Pointer(PointerEvent::Leave)
            }
            "default" => {
                let [value] = numbers("default", &args)?;
                AppEvent::SetDefault(value)
            }
            "quit" | "exit" => AppEvent::Quit,
            _ => return Err(ParseEventError::UnknownCommand(command)),
        };

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_events() {
        let cases = vec![
            (
                "down 0 0 100 100",
                AppEvent::Pointer(PointerEvent::Down(Bounds::new(0.0, 0.0, 100.0, 100.0))),
            ),
            (
                "  MOVE 10.5 -3  ",
                AppEvent::Pointer(PointerEvent::Move(Point::new(10.5, -3.0))),
            ),
            ("up", AppEvent::Pointer(PointerEvent::Up)),
            ("leave", AppEvent::Pointer(PointerEvent::Leave)),
            ("default 42", AppEvent::SetDefault(42.0)),
            ("quit", AppEvent::Quit),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<AppEvent>().unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "spin 1".parse::<AppEvent>(),
            Err(ParseEventError::UnknownCommand("spin".to_string()))
        );
        assert_eq!(
            "move 1".parse::<AppEvent>(),
            Err(ParseEventError::Arity {
                command: "move",
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            "up now".parse::<AppEvent>(),
            Err(ParseEventError::Arity {
                command: "up",
                expected: 0,
                found: 1
            })
        );
        assert_eq!(
            "move 1 x".parse::<AppEvent>(),
            Err(ParseEventError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            "default NaN".parse::<AppEvent>(),
            Err(ParseEventError::InvalidNumber("NaN".to_string()))
        );
    }
}
