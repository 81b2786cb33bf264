//! Dashboard tab navigation

use partnerdesk_domain::{impl_domain_status_conversions, AuthenticatedUser};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Operations,
    Rooms,
    Revenue,
    Bookings,
}

impl_domain_status_conversions!(DashboardTab {
    Operations => "operations",
    Rooms => "rooms",
    Revenue => "revenue",
    Bookings => "bookings",
});

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] =
        [Self::Operations, Self::Rooms, Self::Revenue, Self::Bookings];

    pub fn label(self) -> &'static str {
        match self {
            Self::Operations => "Operations",
            Self::Rooms => "Rooms",
            Self::Revenue => "Revenue",
            Self::Bookings => "Bookings",
        }
    }
}

/// Revenue figures. Booking data is not served yet, so every value is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub today: f64,
    pub monthly: f64,
    pub occupancy_rate_percent: f64,
    pub total_bookings: u32,
}

/// Today's check-ins and check-outs. Zero until bookings are served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingsSummary {
    pub check_ins_today: u32,
    pub check_outs_today: u32,
}

/// Signed-in dashboard with one active tab
#[derive(Debug, Clone)]
pub struct Dashboard {
    user: AuthenticatedUser,
    active: DashboardTab,
}

impl Dashboard {
    pub fn new(user: AuthenticatedUser) -> Self {
        Self { user, active: DashboardTab::default() }
    }

    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    /// Hotel id the boards operate on.
    pub fn hotel_id(&self) -> &str {
        &self.user.id
    }

    pub fn active(&self) -> DashboardTab {
        self.active
    }

    /// Activate `tab`, returning the previously active one.
    pub fn select(&mut self, tab: DashboardTab) -> DashboardTab {
        std::mem::replace(&mut self.active, tab)
    }

    pub fn revenue(&self) -> RevenueSummary {
        RevenueSummary::default()
    }

    pub fn bookings(&self) -> BookingsSummary {
        BookingsSummary::default()
    }
}
