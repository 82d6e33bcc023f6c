use ntex::web;

/// Configures the Instagram webhook routes.
///
/// These are public endpoints; the handshake is guarded by the verify token
/// and deliveries by the payload signature.
///
/// # Routes
/// - `GET /webhook` - Subscription handshake
/// - `POST /webhook` - Messaging events receiver
pub fn instagram(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/webhook").service((super::instagram::verify, super::instagram::receive)),
    );
}
