//! Status table and the error kinds generated from it

use std::sync::OnceLock;

use http::StatusCode;

use crate::error::HttpError;
use crate::message::derive_message;

/// Declares the status table
///
/// Each row names a kind, its constructor on [`HttpError`], and its status
/// code. The kind enum, code lookup, and constructors all come from here so
/// the table stays the single source of truth.
macro_rules! status_table {
    ($($kind:ident => $ctor:ident = $code:literal,)+) => {
        /// Named HTTP error conditions known to the catalog
        ///
        /// Parses from and displays as the kind name (e.g. `TooManyRequests`).
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            strum::EnumString,
            strum::IntoStaticStr,
            strum::Display,
        )]
        pub enum ErrorKind {
            $(
                #[doc = concat!("`", stringify!($code), "`")]
                $kind,
            )+
        }

        impl ErrorKind {
            /// Every kind, in table order
            pub const ALL: &'static [Self] = &[$(Self::$kind,)+];

            /// Status code bound to this kind
            #[must_use]
            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$kind => $code,)+
                }
            }
        }

        impl HttpError {
            $(
                #[doc = concat!("Build a `", stringify!($kind), "` (", stringify!($code), ") error")]
                #[must_use]
                pub const fn $ctor() -> Self {
                    Self::new(ErrorKind::$kind)
                }
            )+
        }
    };
}

status_table! {
    BadRequest => bad_request = 400,
    Unauthorized => unauthorized = 401,
    PaymentRequired => payment_required = 402,
    Forbidden => forbidden = 403,
    NotFound => not_found = 404,
    MethodNotAllowed => method_not_allowed = 405,
    NotAcceptable => not_acceptable = 406,
    ProxyAuthenticationRequired => proxy_authentication_required = 407,
    RequestTimeout => request_timeout = 408,
    Conflict => conflict = 409,
    Duplicate => duplicate = 409,
    Gone => gone = 410,
    LengthRequired => length_required = 411,
    PreconditionFailed => precondition_failed = 412,
    PayloadTooLarge => payload_too_large = 413,
    URITooLong => uri_too_long = 414,
    UnsupportedMediaType => unsupported_media_type = 415,
    RangeNotSatisfiable => range_not_satisfiable = 416,
    ExpectationFailed => expectation_failed = 417,
    IAmATeapot => i_am_a_teapot = 418,
    EnhanceYourCalm => enhance_your_calm = 420,
    MisdirectedRequest => misdirected_request = 421,
    UnprocessableEntity => unprocessable_entity = 422,
    Locked => locked = 423,
    FailedDependency => failed_dependency = 424,
    UnorderedCollection => unordered_collection = 425,
    UpgradeRequired => upgrade_required = 426,
    PreconditionRequired => precondition_required = 428,
    TooManyRequests => too_many_requests = 429,
    RequestHeaderFieldsTooLarge => request_header_fields_too_large = 431,
    NoResponse => no_response = 444,
    RetryWith => retry_with = 449,
    BlockedByWindowsParentalControls => blocked_by_windows_parental_controls = 450,
    UnavailableForLegalReasons => unavailable_for_legal_reasons = 451,
    ClientClosedRequest => client_closed_request = 499,
    InternalServerError => internal_server_error = 500,
    NotImplemented => not_implemented = 501,
    BadGateway => bad_gateway = 502,
    ServiceUnavailable => service_unavailable = 503,
    GatewayTimeout => gateway_timeout = 504,
    HTTPVersionNotSupported => http_version_not_supported = 505,
    VariantAlsoNegotiates => variant_also_negotiates = 506,
    InsufficientStorage => insufficient_storage = 507,
    LoopDetected => loop_detected = 508,
    BandwidthLimitExceeded => bandwidth_limit_exceeded = 509,
    NotExtended => not_extended = 510,
    NetworkAuthenticationRequired => network_authentication_required = 511,
    NetworkReadTimeoutError => network_read_timeout_error = 598,
    NetworkConnectTimeoutError => network_connect_timeout_error = 599,
}

/// Derived messages, indexed by discriminant
static MESSAGES: OnceLock<Vec<String>> = OnceLock::new();

impl ErrorKind {
    /// Kind name as written in the table
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Human-readable message derived from the kind name
    #[must_use]
    pub fn message(self) -> &'static str {
        let messages =
            MESSAGES.get_or_init(|| Self::ALL.iter().map(|kind| derive_message(kind.name())).collect());
        &messages[self as usize]
    }

    /// Status code as an `http` type
    ///
    /// Every table code is in `100..=599`, so the fallback never applies
    /// in practice.
    #[must_use]
    pub fn status(self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// First kind in table order bound to `code`
    ///
    /// `409` resolves to [`ErrorKind::Conflict`].
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    /// Build an error value of this kind
    #[must_use]
    pub const fn error(self) -> HttpError {
        HttpError::new(self)
    }
}
