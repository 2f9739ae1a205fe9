use std::fmt;

use super::*;

pub trait Flattenable {
    fn flatten(&self, sep: &str) -> String;
}

impl<T: fmt::Display> Flattenable for [T] {
    fn flatten(&self, sep: &str) -> String {
        self.iter().map(|word| {
            format!("{}", word)
        }).collect::<Vec<_>>().join(sep)
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Malformed::StraySemicolon => write!(f, "; outside of a definition"),

            Malformed::Unterminated { name: Some(name) } => {
                write!(f, "definition of {} is missing ;", name)
            },

            Malformed::Unterminated { name: None } => {
                write!(f, "definition is missing a name")
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Normal => Ok(()),

            Mode::AwaitingName => write!(f, ":"),

            Mode::Accumulating { name, body } if body.is_empty() => {
                write!(f, ": {}", name)
            },

            Mode::Accumulating { name, body } => {
                write!(f, ": {} {}", name, body.flatten(" "))
            },
        }
    }
}

#[test]
fn errors_read_like_sentences() {
    let err = EvalErr::MalformedDefinition(Malformed::Unterminated {
        name: Some("sq".to_owned()),
    });
    assert_eq!(err.to_string(), "malformed definition: definition of sq is missing ;");
    assert_eq!(EvalErr::UnknownToken("frob".to_owned()).to_string(), "can't understand frob");
}

#[test]
fn open_definition_echoes_its_body() {
    let mode = Mode::Accumulating {
        name: "sq".to_owned(),
        body: vec!["dup".to_owned(), "*".to_owned()],
    };
    assert_eq!(mode.to_string(), ": sq dup *");
    assert_eq!(Mode::Normal.to_string(), "");
}
