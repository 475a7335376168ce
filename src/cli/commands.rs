use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskdown",
    version = VERSION,
    about = "Break big tasks into small ones you will actually do",
    after_help = "\
NOTE:
  Data lives in the platform data dir (override with TASKDOWN_DIR).
  Run `taskdown init` before any other command.
  `breakdown` and `extract` call an OpenAI-compatible endpoint and need
  OPENAI_API_KEY (TASKDOWN_API_BASE / TASKDOWN_MODEL override the defaults).

BEHAVIOR NOTES:
  `breakdown` only suggests; nothing is saved until you `split`.
  `split` flags the parent as broken down and creates the children; it is
  best-effort, so on an error re-fetch with `subtasks` before retrying.
  `delete` removes the task and every subtask under it, however deep.
  `done` on the last open subtask asks whether to complete the parent too;
  it never completes a parent on its own. With --json it reports the
  decision instead of asking.
  Deleting an id that no longer exists succeeds and removes nothing."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Act as this owner instead of the configured one
    #[arg(long, global = true)]
    pub owner: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the taskdown database
    Init,

    /// Add a single top-level task
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Reluctance score, 1 (easy) to 5 (dreaded)
        #[arg(long, default_value = "1")]
        score: i32,
    },

    /// List top-level tasks
    List,

    /// Show one task
    Show {
        /// Task ID
        id: String,
    },

    /// Edit title, description or reluctance score
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        score: Option<i32>,
    },

    /// Ask the model to suggest subtasks for a task (nothing is saved)
    Breakdown {
        /// Task ID
        id: String,
    },

    /// Extract a plain task list from free text (e.g. a voice transcript)
    Extract {
        /// The text to mine for tasks
        text: String,
    },

    /// Save subtasks under a parent task, from stdin JSON
    #[command(after_help = "\
STDIN FORMAT:
  {\"subtasks\":[{\"title\":\"...\", \"description\":\"...\", \"reluctanceScore\":2}, ...]}

NOTE:
  The parent gets brokenDown=true and each child is linked to it with a
  'Created from this big task' note. Children are created one by one with
  no rollback; on failure, `subtasks <id>` shows what actually exists.")]
    Split {
        /// Parent task ID
        id: String,
    },

    /// Save top-level tasks (no parent), from stdin JSON
    #[command(after_help = "\
STDIN FORMAT:
  {\"tasks\":[{\"title\":\"...\", \"reluctanceScore\":1}, ...]}")]
    Save,

    /// List the subtasks of a task, sorted by title
    Subtasks {
        /// Parent task ID
        id: String,
    },

    /// Mark a task complete (may offer to complete its parent)
    Done {
        id: String,
    },

    /// Clear a task's completion
    Reopen {
        id: String,
    },

    /// Delete a task and its whole subtask tree
    Delete {
        id: String,
    },
}
