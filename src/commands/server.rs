// Server command: check (and optionally download) the server runtime jar

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::config;
use crate::runtime;
use crate::sources::http;
use crate::ui;

pub async fn server(download: bool) -> Result<i32> {
    let pb = ui::spinner("Checking Purpur...");

    let info = match runtime::check_runtime_update().await {
        Ok(info) => info,
        Err(e) => {
            ui::finish_error(&pb, "Purpur", &e.to_string());
            return Ok(1);
        }
    };
    ui::finish_up_to_date(&pb, "Purpur", &info.latest_version);

    ui::plain(&format!("  Latest version: {}", info.latest_version));
    ui::plain(&format!("  Latest build:   {}", info.latest_build));
    ui::plain(&format!("  Build status:   {}", info.build_result));
    ui::dim(&format!("  {}", info.download_url));

    if download {
        let filename = info.filename();
        let dest = Path::new(&config::data_dir()).join(&filename);

        let pb = ui::spinner(&format!("Downloading {filename}..."));
        match http::fetch_bytes(&info.download_url).await {
            Ok(bytes) => {
                fs::write(&dest, &bytes)?;
                pb.finish_and_clear();
                ui::success(&format!("Downloaded {} ({} bytes)", dest.display(), bytes.len()));
            }
            Err(e) => {
                ui::finish_error(&pb, &filename, &e.to_string());
                return Ok(1);
            }
        }
    }

    Ok(0)
}
