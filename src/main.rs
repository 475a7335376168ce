use clap::Parser;
use std::process;

use taskdown::cli::commands::{Cli, Commands};
use taskdown::cli::{breakdown, init, task};
use taskdown::error::TaskdownError;
use taskdown::output;

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let owner = cli_args.owner.as_deref();

    let exit_code = match cli_args.command {
        Commands::Init => init::run(json_output, owner),
        Commands::Add {
            title,
            description,
            score,
        } => report(
            task::run_add(&title, description.as_deref(), score, json_output, owner),
            json_output,
        ),
        Commands::List => report(task::run_list(json_output, owner), json_output),
        Commands::Show { id } => report(task::run_show(&id, json_output, owner), json_output),
        Commands::Edit {
            id,
            title,
            description,
            score,
        } => report(
            task::run_edit(
                &id,
                title.as_deref(),
                description.as_deref(),
                score,
                json_output,
                owner,
            ),
            json_output,
        ),
        Commands::Breakdown { id } => {
            report(breakdown::run_breakdown(&id, json_output, owner), json_output)
        }
        Commands::Extract { text } => report(breakdown::run_extract(&text, json_output), json_output),
        Commands::Split { id } => report(breakdown::run_split(&id, json_output, owner), json_output),
        Commands::Save => report(breakdown::run_save(json_output, owner), json_output),
        Commands::Subtasks { id } => report(task::run_subtasks(&id, json_output, owner), json_output),
        Commands::Done { id } => report(task::run_done(&id, json_output, owner), json_output),
        Commands::Reopen { id } => report(task::run_reopen(&id, json_output, owner), json_output),
        Commands::Delete { id } => report(task::run_delete(&id, json_output, owner), json_output),
    };

    process::exit(exit_code);
}

fn report(result: Result<i32, TaskdownError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
