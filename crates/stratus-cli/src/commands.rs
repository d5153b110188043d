use colored::Colorize;
use serde_json::json;
use stratus_store::{
    Account, AccountConfig, AccountFactory, Container, MockAccount, PaginationMap, StoredObject,
};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let account = open_account(&cli)?;
    match cli.command {
        Command::Containers(args) => cmd_containers(&account, args, cli.format),
        Command::Objects(args) => cmd_objects(&account, args, cli.format),
        Command::Pages(args) => cmd_pages(&account, args, cli.format),
        Command::Stat(args) => cmd_stat(&account, args, cli.format),
        Command::Cat(args) => cmd_cat(&account, args),
    }
}

fn open_account(cli: &Cli) -> anyhow::Result<MockAccount> {
    debug!(config = ?cli.config, seed = ?cli.seed, "opening mock account");
    let config = match &cli.config {
        Some(path) => AccountConfig::load(path)?,
        None => AccountConfig::default(),
    };
    let mut factory = AccountFactory::new(config);
    if let Some(seed) = &cli.seed {
        factory = factory.set_mock_on_file_object_store(seed);
    }
    Ok(factory.create_account()?)
}

fn cmd_containers(
    account: &MockAccount,
    args: ListArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let containers = account.list_page(
        args.prefix.as_deref(),
        args.marker.as_deref(),
        args.limit.unwrap_or(usize::MAX),
    )?;
    let mut rows = Vec::with_capacity(containers.len());
    for container in &containers {
        rows.push((
            container.name().to_string(),
            container.object_count()?,
            container.bytes_used()?,
        ));
    }

    match format {
        OutputFormat::Json => {
            let items: Vec<_> = rows
                .iter()
                .map(|(name, count, bytes)| json!({"name": name, "count": count, "bytes": bytes}))
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Text => {
            for (name, count, bytes) in &rows {
                println!("{:>10} {:>6}  {}", bytes, count, name.bold());
            }
        }
    }
    Ok(())
}

fn cmd_objects(
    account: &MockAccount,
    args: ObjectsArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let container = account.container(&args.container);
    let objects = container.list_page(
        args.list.prefix.as_deref(),
        args.list.marker.as_deref(),
        args.list.limit.unwrap_or(usize::MAX),
    )?;

    match format {
        OutputFormat::Json => {
            let mut items = Vec::with_capacity(objects.len());
            for object in &objects {
                items.push(json!({
                    "name": object.name(),
                    "bytes": object.content_length()?,
                    "hash": object.etag()?.to_string(),
                    "last_modified": object.last_modified()?.to_rfc3339(),
                }));
            }
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Text => {
            for object in &objects {
                println!(
                    "{:>10}  {}  {}",
                    object.content_length()?,
                    object.etag()?.to_string().dimmed(),
                    object.name().bold()
                );
            }
        }
    }
    Ok(())
}

fn cmd_pages(
    account: &MockAccount,
    args: PagesArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let prefix = args.prefix.as_deref();
    let (map, pages) = match &args.container {
        Some(name) => {
            let container = account.container(name);
            let map = container.pagination_map(prefix, args.page_size)?;
            let pages = collect_pages(&map, |page| {
                Ok(container
                    .list_paged(&map, page)?
                    .iter()
                    .map(|o| o.name().to_string())
                    .collect())
            })?;
            (map, pages)
        }
        None => {
            let map = account.pagination_map(prefix, args.page_size)?;
            let pages = collect_pages(&map, |page| {
                Ok(account
                    .list_paged(&map, page)?
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect())
            })?;
            (map, pages)
        }
    };

    match format {
        OutputFormat::Json => {
            let out = json!({
                "records": map.number_of_records(),
                "page_size": map.page_size(),
                "pages": pages,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!(
                "{} records, {} per page, {} pages",
                map.number_of_records().to_string().bold(),
                map.page_size(),
                map.number_of_pages().to_string().bold()
            );
            for (index, names) in pages.iter().enumerate() {
                println!(
                    "  {} ({}): {}",
                    format!("page {index}").cyan(),
                    page_start(&map, index),
                    names.join(", ")
                );
            }
        }
    }
    Ok(())
}

/// Where a page begins: the listing start, or the record it follows.
fn page_start(map: &PaginationMap, index: usize) -> String {
    match map.marker(index).flatten() {
        Some(marker) => format!("after {marker:?}"),
        None => "from start".to_string(),
    }
}

fn collect_pages<F>(map: &PaginationMap, mut page: F) -> anyhow::Result<Vec<Vec<String>>>
where
    F: FnMut(usize) -> anyhow::Result<Vec<String>>,
{
    (0..map.number_of_pages()).map(|index| page(index)).collect()
}

fn cmd_stat(
    account: &MockAccount,
    args: StatArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let report = match (&args.container, &args.object) {
        (None, _) => json!({
            "public_url": account.public_url(),
            "containers": account.container_count()?,
            "objects": account.object_count()?,
            "bytes": account.bytes_used()?,
            "metadata": account.metadata()?,
        }),
        (Some(container), None) => {
            let container = account.container(container);
            json!({
                "container": container.name(),
                "objects": container.object_count()?,
                "bytes": container.bytes_used()?,
                "metadata": container.metadata()?,
            })
        }
        (Some(container), Some(object)) => {
            let object = account.container(container).object(object);
            json!({
                "container": object.container_name(),
                "object": object.name(),
                "bytes": object.content_length()?,
                "etag": object.etag()?,
                "last_modified": object.last_modified()?.to_rfc3339(),
                "metadata": object.metadata()?,
            })
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            if let Some(fields) = report.as_object() {
                for (key, value) in fields {
                    let value = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    println!("{:>14}: {}", key.green(), value);
                }
            }
        }
    }
    Ok(())
}

fn cmd_cat(account: &MockAccount, args: CatArgs) -> anyhow::Result<()> {
    use std::io::Write;

    let content = account
        .container(&args.container)
        .object(&args.object)
        .download_object()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}
