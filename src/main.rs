use anyhow::{Context, Result};
use clap::Parser;

use college_api::{
    generate_code, load_college_names, logging, Cli, CollegeService, CollegeStore, Command,
};

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Code { name } => {
            println!("{}", generate_code(&name));
        }
        Command::Import { csv } => {
            let service = open_service(&cli.store.db_path)?;
            run_import(&service, &csv)?;
        }
        Command::List { letter } => {
            let service = open_service(&cli.store.db_path)?;
            run_list(&service, letter.as_deref())?;
        }
    }

    Ok(())
}

fn open_service(db_path: &std::path::Path) -> Result<CollegeService> {
    let store = CollegeStore::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    Ok(CollegeService::new(store))
}

fn run_import(service: &CollegeService, csv_path: &std::path::Path) -> Result<()> {
    let names = load_college_names(csv_path)
        .with_context(|| format!("Failed to read names from {}", csv_path.display()))?;
    tracing::info!(count = names.len(), path = %csv_path.display(), "loaded college names");

    let saved = service.create_many(&names).context("Import failed")?;
    println!("Imported {} colleges", saved.len());

    Ok(())
}

fn run_list(service: &CollegeService, letter: Option<&str>) -> Result<()> {
    let colleges = match letter {
        Some(_) => service.list_by_letter(letter)?,
        None => service.list_all()?,
    };

    for college in &colleges {
        println!("{} ({})", college.college_name, college.college_code);
    }

    Ok(())
}
