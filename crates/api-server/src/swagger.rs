//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Insights Dashboard API",
        version = "0.1.0",
        description = "Customer insights and social media analysis for marketers.\n\nServes the pain point analysis, the customer table, templated outreach content, and per-product social insights with ad previews.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Dashboard", description = "Landing page analyses"),
        (name = "Customers", description = "Customer table, content generation, and dialogs"),
        (name = "Insights", description = "Social media analysis and ad previews"),
        (name = "Operations", description = "Health, readiness, and liveness checks"),
    ),
    paths(
        // Dashboard
        crate::dashboard_rest::handle_pain_points,
        // Customers
        crate::customer_rest::handle_list_customers,
        crate::customer_rest::handle_get_customer,
        crate::customer_rest::handle_generate_content,
        crate::customer_rest::handle_expand,
        crate::customer_rest::handle_get_dialog,
        crate::customer_rest::handle_cancel_generation,
        crate::customer_rest::handle_close_dialog,
        // Insights
        crate::insights_rest::handle_get_insights,
        crate::insights_rest::handle_get_ad,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Dashboard types
        insights_core::PainPointAnalysis,
        insights_core::PainPoint,
        insights_core::ImpactLevel,
        // Customer types
        insights_core::Customer,
        insights_core::CustomerStatus,
        insights_core::ContentChannel,
        insights_core::ContentFormat,
        insights_channels::GeneratedContent,
        insights_channels::ExpandedKind,
        crate::customer_rest::CustomerRow,
        crate::customer_rest::CancelResponse,
        // Insights types
        insights_core::AdChannel,
        insights_core::InsightSection,
        insights_core::ResolvedEntry,
        insights_channels::AdCreative,
        insights_channels::AdCopySource,
        insights_feed::page::SectionView,
        insights_feed::page::PageStatus,
        insights_feed::ProductView,
        insights_feed::InsightsPageView,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
