// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Clients ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::update_observations,
        handlers::clients::delete_client,
        handlers::clients::client_metrics,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::list_sales_by_client,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,

        // --- Payments ---
        handlers::payments::create_payment,
        handlers::payments::delete_payment,
        handlers::payments::list_payments,
        handlers::payments::list_payments_by_sale,
        handlers::payments::list_payments_by_client,

        // --- Store ---
        handlers::store::get_details,
        handlers::store::create_store,
        handlers::store::update_store,
        handlers::store::delete_store,
        handlers::dashboard::store_metrics,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::StoreRole,
            models::auth::User,
            models::auth::LoggedUser,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Store ---
            models::store::Store,
            models::store::MemberWithUser,
            models::dashboard::StoreDetails,
            models::dashboard::StoreMetrics,
            models::dashboard::TopSaleEntry,

            // --- Clients ---
            models::client::Client,
            models::dashboard::ClientMetrics,
            models::dashboard::ClientSaleSummary,
            models::dashboard::Period,

            // --- Sales ---
            models::sale::Sale,
            models::sale::SaleWithTotals,

            // --- Payments ---
            models::payment::Payment,
            models::payment::PaymentWithSale,

            // --- Payloads ---
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,
            handlers::clients::UpdateObservationsPayload,
            handlers::sales::CreateSalePayload,
            handlers::sales::UpdateSalePayload,
            handlers::payments::CreatePaymentPayload,
            handlers::store::CreateStorePayload,
            handlers::store::UpdateStorePayload,
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Clients", description = "Clientes da Caderneta"),
        (name = "Sales", description = "Vendas Fiado"),
        (name = "Payments", description = "Pagamentos e Baixas"),
        (name = "Store", description = "Gestão da Loja e Métricas"),
        (name = "Users", description = "Equipe da Loja e Papéis")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
