pub mod config;
pub mod domain {
    pub mod format;
    pub mod payment;
    pub mod unique_code;
    pub mod validation;
}
pub mod http {
    pub mod extract;
    pub mod handlers {
        pub mod ops;
        pub mod payments;
    }
    pub mod middleware {
        pub mod cors;
    }
    pub mod routes;
}
pub mod notify;
pub mod repo {
    pub mod payments_repo;
}
pub mod service {
    pub mod payment_service;
}
pub mod sheets;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
}
