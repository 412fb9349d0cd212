//! 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결과 IdP 클라이언트를 구성하고 REST API를 제공합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use identity_bridge_service::caching::redis::RedisClient;
use identity_bridge_service::config::{Environment, RateLimitConfig, ServerConfig};
use identity_bridge_service::db::Database;
use identity_bridge_service::errors::AppError;
use identity_bridge_service::repositories::users::UserRepository;
use identity_bridge_service::repositories::verifications::RedisPhoneVerificationStore;
use identity_bridge_service::routes::configure_all_routes;
use identity_bridge_service::services::accounts::AccountService;
use identity_bridge_service::services::identity::{IdTokenVerifier, IdentityToolkitClient, TokenVerifier};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    let environment = Environment::current();
    info!("🚀 인증 서비스 시작중... (환경: {:?})", environment);
    if !environment.is_production() {
        warn!("⚠️ 운영 환경이 아닙니다. IdP 와 데이터 스토어 주소를 확인하세요");
    }

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await.map_err(io::Error::other)?;

    // 서비스 구성
    let (account_service, token_verifier) =
        build_services(database, redis_client).await.map_err(io::Error::other)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(account_service, token_verifier).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    account_service: web::Data<AccountService>,
    token_verifier: web::Data<dyn TokenVerifier>,
) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 공유 서비스
            .app_data(account_service.clone())
            .app_data(token_verifier.clone())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// # IdP 호출과 토큰 검증 실패 사유까지 확인
/// RUST_LOG=identity_bridge_service=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> Result<(Arc<Database>, Arc<RedisClient>), AppError> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await?);
    let redis_client = Arc::new(RedisClient::new().await?);

    Ok((database, redis_client))
}

/// 저장소, IdP 클라이언트, 토큰 검증기를 조립합니다
///
/// 필수 IdP 설정(`IDP_API_KEY`, `IDP_PROJECT_ID`)이 없으면 여기서 실패합니다.
async fn build_services(
    database: Arc<Database>,
    redis_client: Arc<RedisClient>,
) -> Result<(web::Data<AccountService>, web::Data<dyn TokenVerifier>), AppError> {
    let user_repository = UserRepository::new(database);
    user_repository.create_indexes().await?;
    info!("✅ users 컬렉션 인덱스 확인 완료");

    let identity_provider = Arc::new(IdentityToolkitClient::from_env()?);
    let phone_verifications = Arc::new(RedisPhoneVerificationStore::new(redis_client));

    let account_service = AccountService::new(
        identity_provider,
        Arc::new(user_repository),
        phone_verifications,
    );

    let verifier: Arc<dyn TokenVerifier> = Arc::new(IdTokenVerifier::from_env()?);

    Ok((web::Data::new(account_service), web::Data::from(verifier)))
}

/// CORS 설정을 구성합니다
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
