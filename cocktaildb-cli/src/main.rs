use clap::{Parser, Subcommand, ValueEnum};
use cocktaildb::{Document, Store};
use std::collections::HashMap;
use std::process;

/// CocktailDB CLI: read and edit a CocktailDB document from the command line
#[derive(Parser)]
#[command(name = "cocktaildb", version, about)]
struct Cli {
    /// Path to the JSON document
    #[arg(long, default_value = "data.json")]
    data_file: String,

    /// Output format
    #[arg(long, default_value = "yaml")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Get a single record by ID
    Get {
        /// Collection name (cocktails or ingredients)
        collection: String,
        /// Record ID
        id: u64,
    },

    /// List records in a collection
    List {
        /// Collection name (cocktails or ingredients)
        collection: String,
        /// Query parameters (e.g. --param ingredientName=sugar --param sortBy=name)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Insert a new record
    Insert {
        /// Collection name (cocktails or ingredients)
        collection: String,
        /// Field values (e.g. --field name=Vodka --field is_alcoholic=true)
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        /// Read the whole record as JSON from a file, or `-` for stdin
        #[arg(long, conflicts_with = "fields")]
        json: Option<String>,
    },

    /// Update fields of an existing record
    Update {
        /// Collection name (cocktails or ingredients)
        collection: String,
        /// Record ID
        id: u64,
        /// Field values to update (e.g. --field category=Mocktail)
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
    },

    /// Delete a record
    Delete {
        /// Collection name (cocktails or ingredients)
        collection: String,
        /// Record ID
        id: u64,
        /// Show what would be deleted without actually deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show record counts per collection
    Status,

    /// Create an empty document if none exists
    Init,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s.find('=').ok_or_else(|| {
        format!("Invalid key=value pair: no '=' found in '{s}'")
    })?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("ERROR:{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(&cli.data_file)?;

    match cli.command {
        Command::Get { collection, id } => {
            let record = store.get_dynamic(&collection, id)?;
            print_output(&record, &cli.format)?;
        }

        Command::List { collection, params } => {
            let param_map: HashMap<String, String> = params.into_iter().collect();
            let records = store.list_dynamic(&collection, &param_map)?;
            print_output(&records, &cli.format)?;
        }

        Command::Insert {
            collection,
            fields,
            json,
        } => {
            let data = match json {
                Some(source) => read_json(&source)?,
                None => fields_to_value(&fields),
            };
            let created = store.insert_dynamic(&collection, &data)?;
            print_output(&created, &cli.format)?;
        }

        Command::Update {
            collection,
            id,
            fields,
        } => {
            let data = fields_to_value(&fields);
            let updated = store.update_dynamic(&collection, id, &data)?;
            print_output(&updated, &cli.format)?;
        }

        Command::Delete {
            collection,
            id,
            dry_run,
        } => {
            if dry_run {
                let record = store.get_dynamic(&collection, id)?;
                print_output(
                    &serde_json::json!({
                        "dry_run": true,
                        "would_delete": { "collection": collection, "id": id },
                        "record": record,
                    }),
                    &cli.format,
                )?;
            } else {
                store.delete_dynamic(&collection, id)?;
                print_output(&serde_json::json!({ "ok": true, "deleted": id }), &cli.format)?;
            }
        }

        Command::Status => {
            let result = store.status()?;
            print_output(&result, &cli.format)?;
        }

        Command::Init => {
            // Store::open already created the file if it was missing
            let doc: Document = store.load()?;
            print_output(
                &serde_json::json!({
                    "ok": true,
                    "path": store.path().display().to_string(),
                    "cocktails": doc.cocktails.len(),
                    "ingredients": doc.ingredients.len(),
                }),
                &cli.format,
            )?;
        }
    }

    Ok(())
}

fn print_output(
    value: &serde_json::Value,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(value)?);
        }
    }
    Ok(())
}

fn fields_to_value(fields: &[(String, String)]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, val) in fields {
        // Try to parse as JSON value (for booleans and ingredient lists)
        let json_val = serde_json::from_str(val).unwrap_or(serde_json::Value::String(val.clone()));
        map.insert(key.clone(), json_val);
    }
    serde_json::Value::Object(map)
}

fn read_json(source: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = if source == "-" {
        use std::io::Read;
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| format!("Failed to read JSON file '{source}': {e}"))?
    };
    log::debug!("Read {} bytes of JSON from {source}", text.len());
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("ingredientName=Soda Water").unwrap(),
            ("ingredientName".to_string(), "Soda Water".to_string())
        );
        assert_eq!(
            parse_key_value("quantity=a=b").unwrap(),
            ("quantity".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("sortBy").is_err());
    }

    #[test]
    fn test_fields_to_value_parses_json_literals() {
        let value = fields_to_value(&[
            ("name".to_string(), "Vodka".to_string()),
            ("is_alcoholic".to_string(), "true".to_string()),
            ("ingredients".to_string(), r#"[{"name":"Rum","quantity":"50 ml"}]"#.to_string()),
        ]);
        assert_eq!(value["name"], "Vodka");
        assert_eq!(value["is_alcoholic"], true);
        assert_eq!(value["ingredients"][0]["quantity"], "50 ml");
    }

    #[test]
    fn test_cli_parses_list_params() {
        let cli = Cli::try_parse_from([
            "cocktaildb",
            "--format",
            "json",
            "list",
            "cocktails",
            "--param",
            "sortBy=name",
        ])
        .unwrap();
        match cli.command {
            Command::List { collection, params } => {
                assert_eq!(collection, "cocktails");
                assert_eq!(params, vec![("sortBy".to_string(), "name".to_string())]);
            }
            _ => panic!("expected list command"),
        }
    }
}
