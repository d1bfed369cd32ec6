//! todos-client CLI entry point.

use clap::Parser;
use todos_client::cli::todos::TodosAction;
use todos_client::cli::{Cli, Commands, OutputFormat};
use todos_client::client::TodosClient;
use todos_client::output::{format_output, pretty};
use todos_core::todo::{CreateTodoRequest, TodoItem, UpdateTodoRequest};

/// Print a single todo, prefixed with `label` in pretty mode.
fn print_todo(todo: &TodoItem, format: OutputFormat, label: Option<&str>) {
    match format {
        OutputFormat::Json => println!("{}", format_output(todo, format)),
        OutputFormat::Pretty => match label {
            Some(label) => println!("{}:\n{}", label, pretty::format_todo(todo)),
            None => println!("{}", pretty::format_todo(todo)),
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TodosClient::new(&cli.base_url);

    match cli.command {
        Commands::Todos(todos_cmd) => match todos_cmd.action {
            TodosAction::List => {
                let todos = client.list_todos().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&todos, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_todos(&todos)),
                }
            }
            TodosAction::Create { title, content } => {
                let todo = client
                    .create_todo(&CreateTodoRequest::new(title).with_content(content))
                    .await?;
                print_todo(&todo, cli.format, Some("Created"));
            }
            TodosAction::Get { id } => {
                let todo = client.get_todo(id).await?;
                print_todo(&todo, cli.format, None);
            }
            TodosAction::Update {
                id,
                title,
                content,
                completed,
            } => {
                let request = UpdateTodoRequest {
                    title,
                    content,
                    completed,
                };
                let todo = client.update_todo(id, &request).await?;
                print_todo(&todo, cli.format, Some("Updated"));
            }
            TodosAction::Toggle { id } => {
                let todo = client.toggle_todo(id).await?;
                print_todo(&todo, cli.format, Some("Toggled"));
            }
            TodosAction::Delete { id } => {
                client.delete_todo(id).await?;
                if !cli.quiet {
                    println!("Deleted todo {}", id);
                }
            }
        },
    }

    Ok(())
}
