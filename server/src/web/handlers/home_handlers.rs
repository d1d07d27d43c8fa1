// server/src/web/handlers/home_handlers.rs

use actix_web::HttpResponse;

const BANNER: &str = r#"
<div style="display: flex; justify-content: center; align-items: center; text-align: center; color: white; background-color: black; height: 100vh; width: 100%">
  <div>
    <h1>Welcome to <span style="color:yellow">Leafix</span> <span style="color:#ff0000">Server</span></h1>
    <p>This is the API server for <span style="color:#4ef037">Leafix</span> application.</p>
  </div>
</div>
"#;

pub async fn index_handler() -> HttpResponse {
  HttpResponse::Ok().content_type("text/html; charset=utf-8").body(BANNER)
}
