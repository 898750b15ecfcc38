//! Minimal web server for looking at generated pages during development.
//!
//! Every file is sent as HTML except CSS and JavaScript, so that pages named like
//! "catalog.en.html" or served by language negotiation open in the browser instead of downloading.
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use std::path::{Component, Path, PathBuf};

const HOST_NAME: &str = "localhost";

pub fn content_type(path: &str) -> &'static str {
    if path.ends_with("css") {
        "text/css"
    } else if path.ends_with("js") {
        "text/javascript"
    } else {
        "text/html; charset=utf-8"
    }
}

/// Resolves a request path below `root`, refusing anything that leaves it.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }
    let path = root.join(relative);
    Some(if path.is_dir() { path.join("index.html") } else { path })
}

async fn file(req: HttpRequest, root: web::Data<PathBuf>) -> HttpResponse {
    let Some(path) = resolve(&root, req.path()) else {
        return HttpResponse::Forbidden().finish();
    };
    match std::fs::read(&path) {
        Ok(body) => HttpResponse::Ok().content_type(content_type(req.path())).body(body),
        // just send the error message if something goes wrong
        Err(e) => {
            log::debug!("{}: {e}", path.display());
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

pub fn serve(root: PathBuf, port: u16) -> std::io::Result<()> {
    log::warn!("Serving {} at http://{HOST_NAME}:{port}/", root.display());
    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || App::new().app_data(web::Data::new(root.clone())).default_service(web::get().to(file)))
            .bind((HOST_NAME, port))?
            .run()
            .await
    })
}
