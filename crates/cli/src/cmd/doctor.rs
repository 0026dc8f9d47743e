use npbc_core::config::types::ResolvedConfig;

pub fn run(rc: &ResolvedConfig) {
    println!("OK   npbc doctor");
    if rc.from_file {
        println!("path: {}", rc.config_path.display());
    } else {
        println!("path: {} (not found, using defaults)", rc.config_path.display());
    }
    println!("data_dir: {}", rc.data_dir.display());
    println!("database: {}", rc.database.display());
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }
}
