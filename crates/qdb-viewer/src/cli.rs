use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qdb_db::schema;
use qdb_history::DEFAULT_ME_LABEL;

#[derive(Parser, Debug)]
#[command(name = "qdb", author, version, about = "Read ICQ chat history from a .qdb container", long_about = None)]
pub struct Args {
    /// Path to the .qdb container
    #[arg(long, short, env = "QDB_PATH", default_value = "Messages.qdb")]
    pub db: PathBuf,

    /// Control bytes to strip from payloads, as comma separated hex (e.g. `00,08,10,01,12`)
    #[arg(long, env = "QDB_STRIP_BYTES")]
    pub strip_bytes: Option<String>,

    #[arg(long, env = "QDB_USERS_TABLE", default_value = schema::users::TABLE)]
    pub users_table: String,

    #[arg(long, env = "QDB_PARTICIPANTS_TABLE", default_value = schema::participants::TABLE)]
    pub participants_table: String,

    #[arg(long, env = "QDB_MESSAGES_TABLE", default_value = schema::messages::TABLE)]
    pub messages_table: String,

    /// Sender name printed for your own messages
    #[arg(long, env = "QDB_ME_LABEL", default_value = DEFAULT_ME_LABEL)]
    pub me_label: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the tables in the container
    Tables,

    /// List the columns of one table
    Columns { table: String },

    /// Dump every table with a sample of its rows
    Probe {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// List participants as `name (id)`
    Users,

    /// Print the conversation with one participant
    Show {
        /// ICQ number of the participant
        id: i64,

        /// Display name; looked up in the users table when omitted
        #[arg(long)]
        name: Option<String>,

        /// Print the conversation as JSON instead of a transcript
        #[arg(long)]
        json: bool,
    },

    /// Pick conversations interactively
    Browse,
}

impl Args {
    pub fn schema_names(&self) -> schema::SchemaNames {
        schema::SchemaNames {
            users: self.users_table.clone(),
            participants: self.participants_table.clone(),
            messages: self.messages_table.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["qdb", "users"]).unwrap();
        assert_eq!(args.command, Command::Users);
        assert_eq!(args.schema_names(), schema::SchemaNames::default());
    }

    #[test]
    fn show_with_flags() {
        let args =
            Args::try_parse_from(["qdb", "--db", "x.qdb", "show", "123", "--name", "al", "--json"])
                .unwrap();
        assert_eq!(args.db, PathBuf::from("x.qdb"));
        assert_eq!(
            args.command,
            Command::Show {
                id: 123,
                name: Some("al".into()),
                json: true,
            }
        );
    }

    #[test]
    fn probe_limit() {
        let args = Args::try_parse_from(["qdb", "probe", "--limit", "5"]).unwrap();
        assert_eq!(args.command, Command::Probe { limit: 5 });
    }
}
