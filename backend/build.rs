use std::fs;
use std::path::Path;

// Embeds the trunk output: `frontend/dist` is copied to `static/dist`, which
// `include_dir!` picks up. Without a frontend build the placeholder page in
// `static/dist` is served instead.
fn main() {
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");
    println!("cargo:rerun-if-changed=../frontend/dist");

    if !dist_dir.join("index.html").exists() {
        return;
    }
    let _ = fs::remove_dir_all(out_dir);
    if let Err(e) = fs::create_dir_all(out_dir) {
        println!("cargo:warning=cannot create {}: {}", out_dir.display(), e);
        return;
    }
    let options = fs_extra::dir::CopyOptions::new()
        .overwrite(true)
        .content_only(true);
    if let Err(e) = fs_extra::dir::copy(dist_dir, out_dir, &options) {
        println!("cargo:warning=cannot copy the frontend build: {}", e);
    }
}
