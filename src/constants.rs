/// Banner prepended to the aggregated birthday notification
pub const BANNER: &str = "We've got some birthdays!";

/// Default database URL when DATABASE_URL is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite:birfday.db";

/// Default log file path when LOGFILE is not set
pub const DEFAULT_LOGFILE: &str = "/tmp/birfday.log";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birfday=info";
