use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;

use crate::auth::{SessionLifecycle, TokenCodec, TokenIssuer};
use crate::configuration::JwtSettings;
use crate::logger::LoggerMiddleware;
use crate::middleware::JwtMiddleware;
use crate::repository::{
    PgRefreshTokenRepository, PgUserRepository, RefreshTokenRepository, UserRepository,
};
use crate::routes::{
    get_current_user, health_check, login, logout, refresh, register, welcome,
};

pub fn run(
    listener: TcpListener,
    connection: PgPool,
    jwt_config: JwtSettings,
) -> Result<Server, std::io::Error> {
    let codec = TokenCodec::new(&jwt_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let issuer = TokenIssuer::new(codec.clone(), &jwt_config);

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(connection.clone()));
    let refresh_tokens: Arc<dyn RefreshTokenRepository> =
        Arc::new(PgRefreshTokenRepository::new(connection));

    let sessions = web::Data::new(SessionLifecycle::new(
        users.clone(),
        refresh_tokens,
        issuer,
        codec.clone(),
    ));
    let users_data: web::Data<dyn UserRepository> = web::Data::from(users);
    let jwt_config_data = web::Data::new(jwt_config);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(sessions.clone())
            .app_data(users_data.clone())
            .app_data(jwt_config_data.clone())

            // Public routes (no authentication required)
            .route("/health_check", web::get().to(health_check))
            .route("/general/welcome", web::get().to(welcome))
            .route("/auth/register", web::post().to(register))
            .route("/auth/login", web::post().to(login))
            .route("/auth/refresh", web::post().to(refresh))
            .route("/auth/logout", web::post().to(logout))

            // Protected routes (require a bearer access token)
            .service(
                web::scope("/users")
                    .wrap(JwtMiddleware::new(codec.clone()))
                    .route("/me", web::get().to(get_current_user)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
