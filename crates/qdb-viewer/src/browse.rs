use std::io::{BufRead, Write};

use anyhow::Result;
use qdb_history::{ConversationSource, Session};
use tracing::warn;

use crate::render;

const HELP: &str = "Enter a number to open a conversation, `l` to list, `q` to quit.";

/// Line-driven browser: list participants, open one by number, repeat.
/// Each selection replaces the conversation shown before it.
pub fn run<S, R, W>(session: &mut Session<S>, input: R, out: &mut W) -> Result<()>
where
    S: ConversationSource,
    R: BufRead,
    W: Write,
{
    session.refresh()?;
    render::write_participants(out, session.participants(), true)?;
    writeln!(out, "{}", HELP)?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "" => {}
            "l" | "list" => {
                render::write_participants(out, session.participants(), true)?;
            }
            choice => match choice.parse::<usize>() {
                Ok(n) if n >= 1 => match session.select_index(n - 1)? {
                    Some(conversation) => render::write_transcript(out, conversation)?,
                    None => writeln!(out, "No participant #{}", n)?,
                },
                _ => {
                    warn!("Unrecognised browse input {:?}", choice);
                    writeln!(out, "{}", HELP)?;
                }
            },
        }
        prompt(out)?;
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdb_db::ContainerError;
    use qdb_types::{Conversation, NormalizedMessage, Participant, SenderRole};

    struct OneLiner;

    impl ConversationSource for OneLiner {
        fn participants(&self) -> Result<Vec<Participant>, ContainerError> {
            Ok(vec![Participant::new(7, "alice"), Participant::new(8, "bob")])
        }

        fn conversation(
            &self,
            external_id: i64,
            display_name: &str,
        ) -> Result<Conversation, ContainerError> {
            Ok(Conversation {
                participant: Participant::new(external_id, display_name),
                resolved: true,
                messages: vec![NormalizedMessage {
                    text: format!("hello from {display_name}"),
                    sender_role: SenderRole::Other,
                    sender_name: display_name.to_string(),
                    timestamp: qdb_decode::normalize(1.0),
                }],
            })
        }
    }

    fn browse(input: &str) -> (String, Session<OneLiner>) {
        let mut session = Session::new(OneLiner);
        let mut out = Vec::new();
        run(&mut session, input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), session)
    }

    #[test]
    fn opens_selected_conversation() {
        let (out, session) = browse("2\nq\nignored\n");
        assert!(out.contains("   1  alice (7)"));
        assert!(out.contains("== bob (8) =="));
        assert!(out.contains("[1899-12-31 00:00:00] bob: hello from bob"));
        assert!(!out.contains("ignored"));
        assert_eq!(session.current().unwrap().participant.external_id, 8);
    }

    #[test]
    fn later_selection_replaces_earlier() {
        let (_, session) = browse("1\n2\n");
        let current = session.current().unwrap();
        assert_eq!(current.participant.display_name, "bob");
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn bad_input_keeps_going() {
        let (out, session) = browse("zero\n0\n9\n1\n");
        assert!(out.contains("No participant #9"));
        assert!(out.contains(HELP));
        assert_eq!(session.current().unwrap().participant.display_name, "alice");
    }
}
