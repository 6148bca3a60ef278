//! Server construction and wiring.
//!
//! Builds the adapter stack from configuration (real adapters when their
//! collaborator is configured, fallbacks otherwise), assembles the Actix
//! app, and runs the HTTP server.

mod config;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use crate::domain::ports::{
    BlobSink, HotelRepository, MenuRepository, OtpRepository, PushTransport, SmsRelay,
    SubscriptionRepository,
};
use crate::domain::{AuthService, MenuNotifier, MenuPublishService, PushRegistry, TokenCodec};
use crate::inbound::http::auth::{direct_login, send_otp, verify_otp};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::hotels::dashboard;
use crate::inbound::http::menus::{history, latest, today, upload};
use crate::inbound::http::push::{subscribe, unsubscribe, vapid_public_key};
use crate::inbound::http::rate_limit::RateLimiter;
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestId;
use crate::outbound::media::{DataUriBlobSink, HttpMediaStore};
use crate::outbound::persistence::{
    DbPool, DieselHotelRepository, DieselMenuRepository, DieselOtpRepository,
    DieselSubscriptionRepository, PoolConfig,
};
use crate::outbound::push::{HttpPushTransport, LoggingPushTransport, VapidKeys};
use crate::outbound::sms::{HttpSmsRelay, LoggingSmsRelay};

/// Parameter object bundling everything `build_app` needs.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness/liveness state.
    pub health_state: web::Data<HealthState>,
    /// Handler dependency bundle.
    pub http_state: web::Data<HttpState>,
    /// Session token codec consumed by the bearer extractor.
    pub token_codec: web::Data<TokenCodec>,
    /// Per-source limiter for the OTP endpoint.
    pub rate_limiter: web::Data<RateLimiter>,
}

/// Assemble the Actix application with every route and middleware wired.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        token_codec,
        rate_limiter,
    } = deps;

    let api = web::scope("/api")
        .service(
            web::scope("/auth")
                .service(send_otp)
                .service(verify_otp)
                .service(direct_login),
        )
        .service(web::scope("/hotel").service(dashboard))
        .service(
            web::scope("/menu")
                .service(upload)
                .service(history)
                .service(today)
                .service(latest),
        )
        .service(
            web::scope("/push")
                .service(vapid_public_key)
                .service(subscribe)
                .service(unsubscribe),
        );

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(token_codec)
        .app_data(rate_limiter)
        .wrap(RequestId)
        .service(api)
        .service(ready)
        .service(live)
}

fn build_blob_sink(config: &AppConfig) -> std::io::Result<Arc<dyn BlobSink>> {
    match config.media_store_credential() {
        Some(private_key) => {
            let store =
                HttpMediaStore::new(config.media_store_endpoint.clone(), private_key.to_owned())
                    .map_err(|err| std::io::Error::other(err.to_string()))?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("media store credential missing or placeholder; falling back to inline storage");
            Ok(Arc::new(DataUriBlobSink))
        }
    }
}

fn build_push_transport(config: &AppConfig) -> std::io::Result<Arc<dyn PushTransport>> {
    let Some((public_key, key_path)) = config.vapid_material() else {
        warn!("vapid material not configured; push deliveries will only be logged");
        return Ok(Arc::new(LoggingPushTransport));
    };

    let pem = std::fs::read(key_path).map_err(|err| {
        std::io::Error::other(format!(
            "failed to read VAPID private key at {}: {err}",
            key_path.display()
        ))
    })?;
    let vapid = VapidKeys::new(
        config.vapid_subject.clone(),
        public_key.to_owned(),
        &pem,
    )
    .map_err(|err| std::io::Error::other(err.to_string()))?;
    let transport =
        HttpPushTransport::new(vapid).map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(Arc::new(transport))
}

fn build_sms_relay(config: &AppConfig) -> std::io::Result<Arc<dyn SmsRelay>> {
    match &config.sms_gateway_url {
        Some(endpoint) => {
            let relay = HttpSmsRelay::new(endpoint.clone())
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            Ok(Arc::new(relay))
        }
        None => Ok(Arc::new(LoggingSmsRelay)),
    }
}

/// Build the handler state bundle over a database pool.
pub fn build_http_state(config: &AppConfig, pool: &DbPool) -> std::io::Result<HttpState> {
    let hotels: Arc<dyn HotelRepository> = Arc::new(DieselHotelRepository::new(pool.clone()));
    let codes: Arc<dyn OtpRepository> = Arc::new(DieselOtpRepository::new(pool.clone()));
    let menus: Arc<dyn MenuRepository> = Arc::new(DieselMenuRepository::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(DieselSubscriptionRepository::new(pool.clone()));

    let blobs = build_blob_sink(config)?;
    let transport = build_push_transport(config)?;
    let sms = build_sms_relay(config)?;
    let tokens = TokenCodec::new(&config.jwt_secret);

    let notifier = Arc::new(MenuNotifier::new(
        Arc::clone(&hotels),
        Arc::clone(&subscriptions),
        transport,
    ));
    let publisher = Arc::new(MenuPublishService::new(
        Arc::clone(&menus),
        blobs,
        notifier,
    ));
    let auth = Arc::new(AuthService::new(
        Arc::clone(&hotels),
        codes,
        sms,
        tokens,
        Duration::from_secs(config.otp_ttl_seconds),
    ));
    let registry = Arc::new(PushRegistry::new(
        Arc::clone(&hotels),
        Arc::clone(&subscriptions),
    ));

    Ok(HttpState {
        auth,
        publisher,
        registry,
        hotels,
        menus,
        vapid_public_key: config.vapid_public_key.clone(),
    })
}

/// Run the HTTP server until shutdown.
///
/// # Errors
///
/// Returns an error when the pool cannot be built, an adapter fails to
/// construct, or the listener cannot bind.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let http_state = build_http_state(&config, &pool)?;
    let token_codec = TokenCodec::new(&config.jwt_secret);
    let rate_limiter = RateLimiter::new(
        Duration::from_secs(config.otp_rate_window_seconds),
        config.otp_rate_max_requests,
    );

    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(http_state),
        token_codec: web::Data::new(token_codec),
        rate_limiter: web::Data::new(rate_limiter),
    };

    let health_state = deps.health_state.clone();
    let server_deps = deps.clone();
    let server = HttpServer::new(move || build_app(server_deps.clone()))
        .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr, "server running");
    server.run().await
}
