use pitchdesk_application::{
    AuthService, BookingService, DashboardService, FieldService, UserService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub booking_service: BookingService,
    pub dashboard_service: DashboardService,
    pub field_service: FieldService,
    pub user_service: UserService,
    pub frontend_url: String,
}
