use crate::{api::dtr, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let dtr_limiter = build_limiter(config.rate_dtr_per_min);

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/dtr")
                .wrap(dtr_limiter)
                // /dtr/classify
                .service(web::resource("/classify").route(web::post().to(dtr::classify_dtr)))
                // /dtr/export
                .service(web::resource("/export").route(web::post().to(dtr::export_dtr)))
                // /dtr/policy
                .service(web::resource("/policy").route(web::get().to(dtr::get_policy))),
        ),
    );
}
