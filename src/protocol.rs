//! Textual action messages understood by the game server.
//!
//! The verbs and layout are fixed by the server: space-separated integers
//! after the verb and, for every verb except `USE`, a trailing `#`.

use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// One client → server action line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionMessage {
    /// `USE x y`
    Use {
        /// Target tile, relative to the wire origin.
        x: i32,
        /// Target tile, relative to the wire origin.
        y: i32,
    },
    /// `DROP x y slot#`; slot `-1` drops on the ground.
    Drop {
        /// Target tile, relative to the wire origin.
        x: i32,
        /// Target tile, relative to the wire origin.
        y: i32,
        /// Clothing slot receiving the item, or `-1`.
        slot: i32,
    },
    /// `SELF x y slot#`; use the held object on oneself.
    SelfUse {
        /// Player tile, relative to the wire origin.
        x: i32,
        /// Player tile, relative to the wire origin.
        y: i32,
        /// Clothing slot acted on, or `-1`.
        slot: i32,
    },
    /// `REMV x y index#`
    Remove {
        /// Container tile, relative to the wire origin.
        x: i32,
        /// Container tile, relative to the wire origin.
        y: i32,
        /// Contained item index; `-1` takes the top one.
        index: i32,
    },
    /// `SREMV x y slot index#`; take from a worn container.
    SlotRemove {
        /// Player tile, relative to the wire origin.
        x: i32,
        /// Player tile, relative to the wire origin.
        y: i32,
        /// Clothing slot holding the container.
        slot: i32,
        /// Contained item index; `-1` takes the top one.
        index: i32,
    },
    /// `EMOT 0 0 id#`
    Emote {
        /// Emote number.
        id: i32,
    },
}

impl ActionMessage {
    /// Protocol verb of the message.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Use { .. } => "USE",
            Self::Drop { .. } => "DROP",
            Self::SelfUse { .. } => "SELF",
            Self::Remove { .. } => "REMV",
            Self::SlotRemove { .. } => "SREMV",
            Self::Emote { .. } => "EMOT",
        }
    }
}

impl fmt::Display for ActionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Use { x, y } => write!(f, "USE {x} {y}"),
            Self::Drop { x, y, slot } => write!(f, "DROP {x} {y} {slot}#"),
            Self::SelfUse { x, y, slot } => write!(f, "SELF {x} {y} {slot}#"),
            Self::Remove { x, y, index } => write!(f, "REMV {x} {y} {index}#"),
            Self::SlotRemove { x, y, slot, index } => {
                write!(f, "SREMV {x} {y} {slot} {index}#")
            }
            Self::Emote { id } => write!(f, "EMOT 0 0 {id}#"),
        }
    }
}

fn parse_args(verb: &'static str, rest: &str, expected: usize) -> Result<Vec<i32>, ProtocolError> {
    let args = rest
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| ProtocolError::BadInteger(token.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if args.len() == expected {
        Ok(args)
    } else {
        Err(ProtocolError::Arity {
            verb,
            expected,
            found: args.len(),
        })
    }
}

impl FromStr for ActionMessage {
    type Err = ProtocolError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let line = input.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        if word.is_empty() {
            return Err(ProtocolError::Empty);
        }

        let verb: &'static str = match word {
            "USE" => "USE",
            "DROP" => "DROP",
            "SELF" => "SELF",
            "REMV" => "REMV",
            "SREMV" => "SREMV",
            "EMOT" => "EMOT",
            other => return Err(ProtocolError::UnknownVerb(other.to_owned())),
        };

        let terminated = rest.strip_suffix('#');
        let body = match (verb, terminated) {
            ("USE", None) => rest,
            ("USE", Some(_)) | (_, None) => return Err(ProtocolError::Terminator { verb }),
            (_, Some(body)) => body,
        };

        let message = match verb {
            "USE" => match parse_args(verb, body, 2)?.as_slice() {
                &[x, y] => Self::Use { x, y },
                _ => return Err(ProtocolError::Empty),
            },
            "DROP" | "SELF" | "REMV" => match parse_args(verb, body, 3)?.as_slice() {
                &[x, y, slot] if verb == "DROP" => Self::Drop { x, y, slot },
                &[x, y, slot] if verb == "SELF" => Self::SelfUse { x, y, slot },
                &[x, y, index] => Self::Remove { x, y, index },
                _ => return Err(ProtocolError::Empty),
            },
            "SREMV" => match parse_args(verb, body, 4)?.as_slice() {
                &[x, y, slot, index] => Self::SlotRemove { x, y, slot, index },
                _ => return Err(ProtocolError::Empty),
            },
            _ => match parse_args(verb, body, 3)?.as_slice() {
                &[0, 0, id] => Self::Emote { id },
                &[_, _, _] => return Err(ProtocolError::BadInteger(body.trim().to_owned())),
                _ => return Err(ProtocolError::Empty),
            },
        };
        Ok(message)
    }
}
