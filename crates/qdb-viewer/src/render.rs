use std::io::{self, Write};

use qdb_db::queries::TableSample;
use qdb_decode::format_timestamp;
use qdb_types::{Conversation, NormalizedMessage, Participant, SenderRole};

/// Own messages are pushed right, like the outgoing bubbles of the old
/// client.
const ME_INDENT: &str = "                    ";

pub fn message_line(msg: &NormalizedMessage) -> String {
    let indent = match msg.sender_role {
        SenderRole::Me => ME_INDENT,
        SenderRole::Other => "",
    };
    let text = msg.text.replace('\n', &format!("\n{indent}    "));
    format!(
        "{indent}[{}] {}: {}",
        format_timestamp(&msg.timestamp),
        msg.sender_name,
        text
    )
}

pub fn write_transcript<W: Write>(out: &mut W, conversation: &Conversation) -> io::Result<()> {
    writeln!(out, "== {} ==", conversation.participant)?;
    if !conversation.resolved {
        writeln!(out, "(no conversation stored for this participant)")?;
    } else if conversation.is_empty() {
        writeln!(out, "(no messages)")?;
    }
    for msg in &conversation.messages {
        writeln!(out, "{}", message_line(msg))?;
    }
    Ok(())
}

pub fn write_participants<W: Write>(
    out: &mut W,
    participants: &[Participant],
    numbered: bool,
) -> io::Result<()> {
    for (idx, p) in participants.iter().enumerate() {
        if numbered {
            writeln!(out, "{:>4}  {}", idx + 1, p)?;
        } else {
            writeln!(out, "{}", p)?;
        }
    }
    Ok(())
}

pub fn write_sample<W: Write>(out: &mut W, sample: &TableSample) -> io::Result<()> {
    writeln!(out, "\nFetching data from table: {}", sample.table)?;
    writeln!(out, "({})", sample.columns.join(", "))?;
    for row in &sample.rows {
        writeln!(out, "({})", row.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdb_decode::normalize;

    fn msg(role: SenderRole, name: &str, text: &str, date: f64) -> NormalizedMessage {
        NormalizedMessage {
            text: text.into(),
            sender_role: role,
            sender_name: name.into(),
            timestamp: normalize(date),
        }
    }

    #[test]
    fn other_lines_are_flush_left() {
        let line = message_line(&msg(SenderRole::Other, "alice", "hi", 10.5));
        assert_eq!(line, "[1900-01-09 12:00:00] alice: hi");
    }

    #[test]
    fn own_lines_are_indented_including_continuations() {
        let line = message_line(&msg(SenderRole::Me, "Me", "a\nb", 0.0));
        assert!(line.starts_with(ME_INDENT));
        assert!(line.ends_with(&format!("Me: a\n{ME_INDENT}    b")));
    }

    #[test]
    fn transcript_marks_unresolved() {
        let conv = Conversation::unresolved(Participant::new(5, "eve"));
        let mut out = Vec::new();
        write_transcript(&mut out, &conv).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "== eve (5) ==\n(no conversation stored for this participant)\n"
        );
    }

    #[test]
    fn numbered_participants() {
        let people = [Participant::new(1, "a"), Participant::new(2, "b")];
        let mut out = Vec::new();
        write_participants(&mut out, &people, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "   1  a (1)\n   2  b (2)\n");
    }

    #[test]
    fn sample_dump() {
        let sample = TableSample {
            table: "Users".into(),
            columns: vec!["id".into(), "name".into()],
            rows: vec![vec!["1".into(), "a".into()]],
        };
        let mut out = Vec::new();
        write_sample(&mut out, &sample).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nFetching data from table: Users\n(id, name)\n(1, a)\n"
        );
    }
}
