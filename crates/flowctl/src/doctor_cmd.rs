use flowctl_catalog::Catalog;
use flowctl_core::config;
use flowctl_core::error::FlowError;

/// Local-only environment diagnostics. Never contacts a control plane.
pub fn handle_doctor() -> Result<i32, FlowError> {
    println!("=== Platform ===");
    print_platform_info();
    println!();

    println!("=== Configuration ===");
    print_config_status();
    println!();

    println!("=== Node Catalog ===");
    print_catalog_status();
    println!();

    println!("=== Version Store ===");
    print_version_store_status();

    Ok(0)
}

fn print_platform_info() {
    println!("OS:      {} {}", std::env::consts::OS, std::env::consts::ARCH);
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}

fn print_config_status() {
    match config::config_file_path() {
        Some(path) => {
            println!("Config path: {}", path.display());
            match config::load(&path) {
                Ok(cfg) => {
                    println!("Default profile: {:?}", cfg.default_profile);
                    match &cfg.control_plane_url {
                        Some(url) => println!("Control plane:   configured ({url})"),
                        None => println!("Control plane:   not configured (local-only mode)"),
                    }
                }
                Err(e) => println!("Config load failed: {e}"),
            }
        }
        None => println!("Config path: (unable to determine for this platform)"),
    }
}

fn print_catalog_status() {
    match Catalog::open() {
        Ok(_) => println!("Loaded {} node definition(s)", Catalog::all().len()),
        Err(e) => println!("Catalog failed to open: {e}"),
    }
}

fn print_version_store_status() {
    match config::data_dir() {
        Some(dir) => {
            let versions_dir = dir.join("versions");
            let writable = std::fs::create_dir_all(&versions_dir).is_ok();
            println!("Data dir:  {}", dir.display());
            println!("Writable:  {}", if writable { "yes" } else { "no" });
        }
        None => println!("Data dir:  (unable to determine for this platform)"),
    }
}
