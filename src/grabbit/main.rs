use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use grabbit::api::{CmdMessage, GrabbitApi, ListQuery, MessageLevel, NewItem, UpdateRequest};
use grabbit::config::GrabbitConfig;
use grabbit::error::{GrabbitError, Result};
use grabbit::model::{Item, Priority, Status};
use grabbit::store::fs::FileStore;
use grabbit::sync::CommandFetcher;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: GrabbitApi<FileStore>,
    config: GrabbitConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add {
            name,
            store,
            category,
            recipient,
            notes,
            priority,
            url,
            price,
            recurring,
        }) => handle_add(
            &mut ctx,
            NewItem {
                name,
                store,
                category,
                recipient,
                notes,
                priority,
                url,
                price,
                recurring,
                source: None,
            },
        ),
        Some(Commands::List {
            status,
            store,
            category,
            recipient,
            priority,
        }) => handle_list(
            &ctx,
            ListQuery {
                status,
                store,
                category,
                recipient,
                priority,
            },
        ),
        Some(Commands::Store { store }) => handle_result(ctx.api.at_store(&store)?),
        Some(Commands::For { recipient }) => handle_result(ctx.api.for_recipient(&recipient)?),
        Some(Commands::Urgent) => handle_result(ctx.api.urgent()?),
        Some(Commands::Search { query }) => handle_result(ctx.api.search(&query)?),
        Some(Commands::Buy { id, name }) => handle_buy(&mut ctx, id, name),
        Some(Commands::Archive { id }) => {
            let id = resolve_id(&ctx, &id)?;
            handle_result(ctx.api.archive(&id)?)
        }
        Some(Commands::Restore { id }) => {
            let id = resolve_id(&ctx, &id)?;
            handle_result(ctx.api.restore(&id)?)
        }
        Some(Commands::Delete { id }) => {
            let id = resolve_id(&ctx, &id)?;
            handle_result(ctx.api.delete(&id)?)
        }
        Some(Commands::Update {
            id,
            name,
            status,
            store,
            category,
            recipient,
            notes,
            priority,
            url,
            price,
            recurring,
        }) => {
            let id = resolve_id(&ctx, &id)?;
            let request = UpdateRequest {
                name,
                status,
                store,
                category,
                recipient,
                notes,
                priority,
                url,
                price,
                recurring,
            };
            handle_result(ctx.api.update(&id, &request)?)
        }
        Some(Commands::Recent { days }) => {
            let days = days.unwrap_or(ctx.config.recent_days);
            handle_result(ctx.api.recently_bought(days)?)
        }
        Some(Commands::Summary) => handle_summary(&ctx),
        Some(Commands::Stores) => handle_stores(&ctx),
        Some(Commands::Sync) => handle_sync(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, ListQuery::default()),
    }
}

fn data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("GRABBIT_HOME") {
        return PathBuf::from(home);
    }
    let proj_dirs =
        ProjectDirs::from("com", "grabbit", "grabbit").expect("Could not determine data dir");
    proj_dirs.data_dir().to_path_buf()
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir();
    let config = GrabbitConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(&data_dir);
    let api = GrabbitApi::new(store);

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

/// Accept a full uuid or a unique prefix of one, so the ids shown in list
/// output are usable directly.
fn resolve_id(ctx: &AppContext, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    let all = ctx
        .api
        .list(&ListQuery {
            status: "all".to_string(),
            ..ListQuery::default()
        })?
        .listed_items;
    let needle = input.to_lowercase();
    let matches: Vec<Uuid> = all
        .iter()
        .map(|item| item.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(GrabbitError::Api(format!("No item with id '{}'", input))),
        n => Err(GrabbitError::Api(format!(
            "Id '{}' is ambiguous ({} matches)",
            input, n
        ))),
    }
}

fn handle_add(ctx: &mut AppContext, new_item: NewItem) -> Result<()> {
    let result = ctx.api.add(new_item)?;
    print_messages(&result.messages);
    if let Some(item) = &result.item {
        println!("{}", format!("id {}", short_id(item)).dimmed());
    }
    Ok(())
}

fn handle_list(ctx: &AppContext, query: ListQuery) -> Result<()> {
    let result = ctx.api.list(&query)?;
    handle_result(result)
}

fn handle_buy(ctx: &mut AppContext, id: Option<String>, name: Option<String>) -> Result<()> {
    let id = match id {
        Some(input) => Some(resolve_id(ctx, &input)?),
        None => None,
    };
    let result = ctx.api.mark_bought(id, name.as_deref())?;
    if !result.matches.is_empty() {
        print_items(&result.matches);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_summary(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.summary()?;
    let summary = match result.summary {
        Some(summary) => summary,
        None => return Ok(()),
    };

    println!(
        "{}  needed {}  bought {}  urgent {}",
        "Summary".bold(),
        summary.total_needed,
        summary.total_bought,
        summary.urgent
    );
    if !summary.by_category.is_empty() {
        println!("{}", "By category".bold());
        for (category, count) in &summary.by_category {
            println!("  {:<14} {}", category.to_string(), count);
        }
    }
    if !summary.stores.is_empty() {
        println!("{}", "By store".bold());
        for (store, count) in &summary.stores {
            println!("  {:<14} {}", store, count);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_stores(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stores()?;
    if let Some(counts) = &result.store_counts {
        if counts.is_empty() {
            println!("No stores in use.");
        }
        for (store, count) in counts {
            println!("  {:<20} {} needed", store, count);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_sync(ctx: &mut AppContext) -> Result<()> {
    let command = match &ctx.config.sync_command {
        Some(command) => command.clone(),
        None => {
            println!(
                "{}",
                "No sync command configured. Set one with: grabbit config sync-command '<cmd>'"
                    .yellow()
            );
            return Ok(());
        }
    };

    let fetcher = CommandFetcher::new(&command)?;
    let result = ctx.api.sync(&fetcher)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            let command = ctx
                .config
                .sync_command
                .as_ref()
                .map(|c| c.join(" "))
                .unwrap_or_else(|| "(unset)".to_string());
            println!("sync-command = {}", command);
            println!("recent-days = {}", ctx.config.recent_days);
        }
        (Some("sync-command"), None) => {
            let command = ctx
                .config
                .sync_command
                .as_ref()
                .map(|c| c.join(" "))
                .unwrap_or_else(|| "(unset)".to_string());
            println!("sync-command = {}", command);
        }
        (Some("sync-command"), Some(v)) => {
            let command: Vec<String> = v.split_whitespace().map(|s| s.to_string()).collect();
            if command.is_empty() {
                ctx.config.sync_command = None;
            } else {
                ctx.config.sync_command = Some(command);
            }
            ctx.config.save(&ctx.data_dir)?;
            println!("{}", "Config saved".green());
        }
        (Some("recent-days"), None) => {
            println!("recent-days = {}", ctx.config.recent_days);
        }
        (Some("recent-days"), Some(v)) => {
            let days: u32 = v
                .parse()
                .map_err(|_| GrabbitError::Api(format!("Invalid number of days: '{}'", v)))?;
            ctx.config.recent_days = days;
            ctx.config.save(&ctx.data_dir)?;
            println!("{}", "Config saved".green());
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn handle_result(result: grabbit::api::CmdResult) -> Result<()> {
    print_items(&result.listed_items);
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 10;

fn short_id(item: &Item) -> String {
    item.id.to_string()[..8].to_string()
}

fn item_label(item: &Item) -> String {
    let mut label = item.name.clone();
    if item.is_gift() {
        label.push_str(&format!(" for {}", item.recipient));
    }
    if let Some(notes) = &item.notes {
        let preview: String = notes
            .chars()
            .take(40)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        label.push_str(&format!(" ({})", preview));
    }
    if let Some(store) = &item.store {
        label.push_str(&format!(" @ {}", store));
    }
    label
}

fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("Nothing to grab.");
        return;
    }

    for item in items {
        let marker = match item.status {
            Status::Bought => " ✓ ".green(),
            Status::Archived => " × ".dimmed(),
            Status::Needed => match item.priority {
                Priority::Urgent => "!! ".red(),
                Priority::High => " ! ".yellow(),
                _ => "   ".normal(),
            },
        };

        // Bought items read better with their purchase date.
        let timestamp = match item.status {
            Status::Bought => item.bought_at.unwrap_or(item.added_at),
            _ => item.added_at,
        };
        let time_ago = format_time_ago(timestamp);

        let fixed_width = 3 + TIME_WIDTH + ID_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label = truncate_to_width(&item_label(item), available);
        let padding = available.saturating_sub(label.width());

        println!(
            "{}{}{}{}  {}",
            marker,
            label,
            " ".repeat(padding),
            time_ago.dimmed(),
            short_id(item).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
