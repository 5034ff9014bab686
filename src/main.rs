use log::info;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use tle2state::output::{write_key_value, CsvSink};
use tle2state::{tle_to_cartesian, ConversionConfig};

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut args = env::args().skip(1);
    let tle_path = args
        .next()
        .ok_or("usage: tle2state <tle-file> [config.yaml]")?;
    let config = match args.next() {
        Some(path) => ConversionConfig::from_yaml_file(path)?,
        None => ConversionConfig::default(),
    };
    info!("Using {:?}", config);

    let text = fs::read_to_string(&tle_path)?;
    let record = tle_to_cartesian(&text, &config)?;

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;

    write_key_value(&record, output_dir.join("cartesian_coords.txt"))?;

    let mut sink = CsvSink::append(output_dir.join("cartesian_coords.csv"))?;
    sink.write(&record)?;
    sink.flush()?;

    print!("{}", record);
    Ok(())
}
