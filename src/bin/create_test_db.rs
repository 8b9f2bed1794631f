use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use operaciones_rs::{
    DEFAULT_STATUS, DELETED_STATUS, Database, NewOperation, create_operation, format_timestamp,
    get_local_offset, initialize_db, local_timezone_or_system,
};

/// A utility for creating a test database for the REST API server of operaciones_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The canonical name of the timezone the sample operations are stamped in.
    ///
    /// Defaults to the timezone of the host.
    #[arg(long)]
    timezone: Option<String>,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Database::new(output_path).connect()?;

    initialize_db(&conn)?;

    println!("Creating sample operations...");

    let samples = [
        ("Compra", "Ana", 100.0, 98.5, DEFAULT_STATUS),
        ("Venta", "Beto", 250.0, 246.1, DEFAULT_STATUS),
        ("Compra", "Carla", 75.5, 74.2, "Pendiente"),
        ("Venta", "Ana", 20.0, 19.7, DELETED_STATUS),
    ];
    let timezone = local_timezone_or_system(args.timezone);
    let Some(local_offset) = get_local_offset(&timezone) else {
        eprintln!("Unknown timezone {timezone:?}.");
        exit(1);
    };
    let now = OffsetDateTime::now_utc().to_offset(local_offset);
    let days_ago = (0..samples.len() as i64).rev();

    for (days_ago, (tipo, cliente, importe, usdt, estado)) in days_ago.zip(samples) {
        let operation = NewOperation {
            tipo: tipo.to_owned(),
            cliente: cliente.to_owned(),
            importe,
            usdt,
            estado: estado.to_owned(),
        };
        let fecha = format_timestamp(now - Duration::days(days_ago))?;
        create_operation(&operation, &fecha, &conn)?;
    }

    println!("Success!");

    Ok(())
}
