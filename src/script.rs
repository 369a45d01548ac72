use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::input::Action;

/// Held actions replayed over spans of frames, for running without a keyboard.
///
/// One span per line: a frame count followed by the actions held for those frames. Blank lines
/// and anything after `#` are ignored.
///
/// ```text
/// 30               # stand still for half a second
/// 120 right run
/// 20 right jump
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputScript {
    spans: Vec<(u32, Vec<Action>)>,
}

impl InputScript {
    pub fn parse(text: &str) -> Result<InputScript> {
        let mut spans = vec![];
        for (i, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let frames: u32 = match tokens.next() {
                Some(t) => t.parse().with_context(|| {
                    format!("Line {}: expected a frame count, got \"{}\"", i + 1, t)
                })?,
                None => continue,
            };

            let mut actions = vec![];
            for token in tokens {
                match Action::from_name(token) {
                    Some(a) => actions.push(a),
                    None => bail!("Line {}: unrecognized action \"{}\"", i + 1, token),
                }
            }
            spans.push((frames, actions));
        }
        Ok(InputScript { spans })
    }

    pub fn load(path: &Path) -> Result<InputScript> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read input script {}", path.display()))?;
        InputScript::parse(&text)
            .with_context(|| format!("Unable to parse input script {}", path.display()))
    }

    pub fn total_frames(&self) -> u64 {
        self.spans.iter().map(|(frames, _)| *frames as u64).sum()
    }

    /// The actions held on `frame`; nothing once the script has run out.
    pub fn actions_for_frame(&self, frame: u64) -> &[Action] {
        let mut start = 0u64;
        for (frames, actions) in &self.spans {
            let end = start + *frames as u64;
            if frame < end {
                return actions;
            }
            start = end;
        }
        &[]
    }
}

#[cfg(test)]
mod script_tests {
    use super::*;

    #[test]
    fn spans_cover_consecutive_frames() {
        let script = InputScript::parse(
            "# warm up\n\
             2\n\
             \n\
             3 right run   # dash\n\
             1 jump\n",
        )
        .unwrap();

        assert_eq!(script.total_frames(), 6);
        assert!(script.actions_for_frame(0).is_empty());
        assert!(script.actions_for_frame(1).is_empty());
        assert_eq!(
            script.actions_for_frame(2),
            &[Action::MoveRight, Action::Run][..]
        );
        assert_eq!(
            script.actions_for_frame(4),
            &[Action::MoveRight, Action::Run][..]
        );
        assert_eq!(script.actions_for_frame(5), &[Action::Jump][..]);
        assert!(script.actions_for_frame(6).is_empty());
        assert!(script.actions_for_frame(1000).is_empty());
    }

    #[test]
    fn bad_lines_are_reported_with_line_numbers() {
        let err = InputScript::parse("10 right\nten left\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"));

        let err = InputScript::parse("10 right\n5 fly\n").unwrap_err();
        assert!(err.to_string().contains("fly"));
    }
}
