use actix_files as fs;
use actix_web::web;
use std::path::{Path, PathBuf};

/// Directory holding the player and admin pages
#[derive(Debug, Clone)]
pub struct StaticDir(pub PathBuf);

/// Player page
pub async fn index(dir: web::Data<StaticDir>) -> actix_web::Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async(dir.0.join("index.html")).await?)
}

/// Admin console page
pub async fn admin(dir: web::Data<StaticDir>) -> actix_web::Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async(dir.0.join("admin.html")).await?)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.app_data(web::Data::new(StaticDir(static_dir.to_path_buf())))
        .service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/admin").route(web::get().to(admin)))
        .service(fs::Files::new("/static", static_dir))
        .service(fs::Files::new("/", static_dir));
}
