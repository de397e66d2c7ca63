//! CLI argument parsing via clap.

use clap::{Args as ClapArgs, Parser, Subcommand};

use frontdesk::api::{BookingStatus, RoomServiceStatus, SortDirection};

/// Hotel front-desk client: sessions, rooms, bookings and guest services.
#[derive(Debug, Parser)]
#[command(name = "frontdesk", version, long_version = frontdesk::build_info::LONG_VERSION)]
pub struct Args {
    /// Path to config file (default: ./frontdesk.toml or ~/.config/frontdesk/frontdesk.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override API base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Keep tokens in memory only for this run.
    #[arg(long = "ephemeral", global = true)]
    pub ephemeral: bool,

    /// Increase log detail on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config to ~/.config/frontdesk/frontdesk.toml.
    Init {
        /// Replace an existing file (a backup is kept).
        #[arg(long)]
        force: bool,
    },
    /// Sign in and store the session tokens.
    Login {
        #[arg(long, required_unless_present = "oauth")]
        email: Option<String>,
        /// Prompted for when omitted.
        #[arg(long, conflicts_with = "oauth")]
        password: Option<String>,
        /// Sign in through the identity provider in a browser instead.
        #[arg(long, conflicts_with = "email")]
        oauth: bool,
    },
    /// Create an operator account and sign in.
    Signup(SignupArgs),
    /// Forget the stored session.
    Logout,
    /// Show stored session state and ask the backend to validate it.
    Status {
        /// Skip the backend validation call.
        #[arg(long)]
        offline: bool,
    },
    /// Manage rooms.
    #[command(subcommand)]
    Rooms(RoomsCommand),
    /// Manage bookings and the guest lifecycle.
    #[command(subcommand)]
    Bookings(BookingsCommand),
    /// Today's arrivals, departures and occupancy.
    Dashboard,
    /// Manage room-service requests.
    #[command(subcommand)]
    Services(ServicesCommand),
    /// Manage the amenity catalog.
    #[command(subcommand)]
    Amenities(AmenitiesCommand),
}

#[derive(Debug, ClapArgs)]
pub struct SignupArgs {
    #[arg(long = "first-name")]
    pub first_name: String,
    #[arg(long = "last-name")]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// Prompted for (twice) when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, ClapArgs)]
pub struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 10)]
    pub size: u32,
    #[arg(long = "sort-by")]
    pub sort_by: Option<String>,
    /// asc or desc.
    #[arg(long)]
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "min-price")]
        min_price: Option<f64>,
        #[arg(long = "max-price")]
        max_price: Option<f64>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
    },
    Show {
        id: u64,
    },
    Create {
        #[arg(long)]
        number: String,
        #[arg(long)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
        #[arg(long)]
        price: f64,
        /// Amenity id; repeat for several.
        #[arg(long = "amenity")]
        amenities: Vec<u64>,
    },
    Update {
        id: u64,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
        #[arg(long)]
        price: Option<f64>,
        /// Replaces the amenity list; repeat for several.
        #[arg(long = "amenity")]
        amenities: Option<Vec<u64>>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    Show {
        id: u64,
    },
    Create {
        #[arg(long = "first-name")]
        first_name: String,
        #[arg(long = "last-name")]
        last_name: String,
        #[arg(long, default_value = "")]
        pronouns: String,
        /// YYYY-MM-DD
        #[arg(long = "check-in")]
        check_in: String,
        /// YYYY-MM-DD
        #[arg(long = "check-out")]
        check_out: String,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
        #[arg(long)]
        room: u64,
    },
    /// Set a booking's status directly.
    SetStatus {
        id: u64,
        status: BookingStatus,
    },
    CheckIn {
        id: u64,
    },
    CheckOut {
        id: u64,
    },
    Cancel {
        id: u64,
    },
    /// Bill for a stay before check-out.
    Summary {
        id: u64,
    },
    /// Rooms free for a stay.
    Available {
        #[arg(long = "check-in")]
        check_in: String,
        #[arg(long = "check-out")]
        check_out: String,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
    },
    Upcoming,
    Current,
    /// Total bookings, or bookings in one status.
    Count {
        status: Option<BookingStatus>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    List,
    Show {
        id: u64,
    },
    Create {
        #[arg(long)]
        room: String,
        /// CLEANING, MAINTENANCE, FOOD_DELIVERY, LAUNDRY, MINI_BAR,
        /// TOWEL_CHANGE, AMENITIES or OTHER.
        #[arg(long = "type")]
        service_type: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: Option<String>,
    },
    SetStatus {
        id: u64,
        status: RoomServiceStatus,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum AmenitiesCommand {
    /// Amenities that can be attached to rooms.
    Active,
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        /// Only active amenities.
        #[arg(long = "active-only")]
        active_only: bool,
    },
    Show {
        id: u64,
    },
    /// Look an amenity up by exact name.
    Find {
        name: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Create it deactivated.
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Deactivate an amenity, or remove it with --permanent.
    Delete {
        id: u64,
        #[arg(long)]
        permanent: bool,
    },
    Count,
    /// Check whether a name is already taken.
    CheckName {
        name: String,
    },
    /// Amenities attached to at least one room.
    InUse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = Args::parse_from(["frontdesk", "rooms", "show", "3", "--ephemeral", "-vv"]);
        assert!(args.ephemeral);
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Command::Rooms(RoomsCommand::Show { id: 3 })));
    }

    #[test]
    fn login_password_is_optional() {
        let args = Args::parse_from(["frontdesk", "login", "--email", "desk@hotel.test"]);
        let Command::Login { email, password, oauth } = args.command else {
            panic!("expected login");
        };
        assert_eq!(email.as_deref(), Some("desk@hotel.test"));
        assert!(password.is_none());
        assert!(!oauth);
    }

    #[test]
    fn login_needs_email_unless_oauth() {
        let args = Args::parse_from(["frontdesk", "login", "--oauth"]);
        assert!(matches!(args.command, Command::Login { email: None, oauth: true, .. }));
        assert!(Args::try_parse_from(["frontdesk", "login"]).is_err());
        assert!(Args::try_parse_from(["frontdesk", "login", "--oauth", "--email", "a@b.c"]).is_err());
    }

    #[test]
    fn booking_status_values_parse_loosely() {
        let args = Args::parse_from(["frontdesk", "bookings", "list", "--status", "checked-in", "--page", "2"]);
        let Command::Bookings(BookingsCommand::List { page, status, .. }) = args.command else {
            panic!("expected bookings list");
        };
        assert_eq!(status, Some(BookingStatus::CheckedIn));
        assert_eq!(page.page, 2);
        assert!(Args::try_parse_from(["frontdesk", "bookings", "count", "lost"]).is_err());
    }

    #[test]
    fn repeated_amenity_flags_collect() {
        let args = Args::parse_from([
            "frontdesk", "rooms", "create", "--number", "101", "--adults", "2", "--price", "120",
            "--amenity", "1", "--amenity", "4",
        ]);
        let Command::Rooms(RoomsCommand::Create { amenities, children, .. }) = args.command else {
            panic!("expected rooms create");
        };
        assert_eq!(amenities, vec![1, 4]);
        assert_eq!(children, 0);
    }

    #[test]
    fn service_status_and_base_url_override() {
        let args = Args::parse_from([
            "frontdesk", "--base-url", "http://desk:8080/api", "services", "set-status", "5", "in-progress",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://desk:8080/api"));
        assert!(matches!(
            args.command,
            Command::Services(ServicesCommand::SetStatus { id: 5, status: RoomServiceStatus::InProgress })
        ));
    }

    #[test]
    fn amenity_subcommands_parse() {
        let args = Args::parse_from(["frontdesk", "amenities", "delete", "4", "--permanent"]);
        assert!(matches!(
            args.command,
            Command::Amenities(AmenitiesCommand::Delete { id: 4, permanent: true })
        ));
        let args = Args::parse_from(["frontdesk", "amenities", "update", "2", "--active", "false"]);
        let Command::Amenities(AmenitiesCommand::Update { active, name, .. }) = args.command else {
            panic!("expected amenities update");
        };
        assert_eq!(active, Some(false));
        assert!(name.is_none());
    }
}
