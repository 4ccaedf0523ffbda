use sqlx::PgPool;
use tracing::warn;

pub(super) async fn check_postgres(pool: &PgPool) -> &'static str {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => "ok",
        Err(error) => {
            warn!(error = %error, "postgres health check failed");
            "error"
        }
    }
}
