//! Host-side helper: `cargo run` builds the WASM site into `static/pkg` and
//! serves `static/` on a local HTTP server.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const PORT: &str = "8000";

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    // Check the bundled config and content before spending time on a build.
    let config = match folio_wasm::SiteConfig::bundled() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("site.toml is invalid: {err}");
            std::process::exit(1);
        }
    };
    let content = folio_wasm::content::SiteContent::bundled();
    let mut rejected = false;
    for err in content.errors() {
        rejected = true;
        eprintln!("bundled content is invalid: {err}");
        for issue in err.issues() {
            eprintln!("  {issue}");
        }
    }
    if rejected {
        std::process::exit(1);
    }
    println!("Contact form posts to {}", config.contact.endpoint);

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Launching local server at http://127.0.0.1:{PORT} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = server {
        eprintln!("failed to start http server: {err}");
        std::process::exit(1);
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
