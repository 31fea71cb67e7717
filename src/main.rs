//! App Shelf command-line entry point.
//!
//! Usage:
//!   appshelf list
//!   appshelf search <term>
//!   appshelf export [dir]
//!   appshelf import <file>

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use appshelf::app::App;
use appshelf::managers::bookmark_manager::BookmarkManagerTrait;
use appshelf::services::config_loader::{init_logging, ConfigLoader};
use appshelf::types::bookmark::UNORGANIZED;

fn usage() -> ExitCode {
    eprintln!("usage: appshelf <list | search <term> | export [dir] | import <file>>");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut loader = ConfigLoader::new(None);
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("appshelf: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    let mut app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("appshelf: failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.first().map(String::as_str) {
        Some("list") => {
            let data = app.bookmarks.data();
            for folder in &data.folders {
                println!("{} ({})", folder.name, folder.id);
                for bookmark in &folder.bookmarks {
                    println!("  {}  {}", bookmark.name, bookmark.url);
                }
            }
            println!("{}", UNORGANIZED);
            for bookmark in &data.unorganized {
                println!("  {}  {}", bookmark.name, bookmark.url);
            }
            ExitCode::SUCCESS
        }
        Some("search") => {
            let Some(term) = args.get(1) else {
                return usage();
            };
            for hit in app.bookmarks.search_bookmarks(term) {
                println!("[{}] {}  {}", hit.folder_id, hit.bookmark.name, hit.bookmark.url);
            }
            ExitCode::SUCCESS
        }
        Some("export") => {
            let dir = match args.get(1) {
                Some(dir) => PathBuf::from(dir),
                None => app.config.resolved_export_dir(),
            };
            match app.bookmarks.export_to_dir(&dir) {
                Ok(path) => {
                    println!("Bookmarks exported to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("appshelf: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Some("import") => {
            let Some(file) = args.get(1) else {
                return usage();
            };
            match app.bookmarks.import_file(&PathBuf::from(file)) {
                Ok(()) => {
                    println!("Bookmarks imported successfully");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("appshelf: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        _ => usage(),
    }
}
