//! Static tables driving mypy.ini generation.
//!
//! The ignore list is the only part expected to change over time: components
//! listed there have known type errors and are exempted from all checks until
//! someone fixes them. Do your best to not add anything new here.

/// Error-sink tag for every issue this tool reports.
pub const PLUGIN: &str = "mypy_config";

/// Cache key under which the rendered document is passed from the validate
/// phase to the generate phase.
pub const CACHE_KEY: &str = "mypy_config";

/// Namespace that holds all integration components.
pub const COMPONENTS_NAMESPACE: &str = "homeassistant.components";

/// Default declaration-list path, relative to the repository root.
pub const STRICT_TYPING_FILE: &str = ".strict-typing";

/// Default output path, relative to the repository root.
pub const MYPY_INI: &str = "mypy.ini";

/// Default interpreter version written into the general section.
pub const PYTHON_VERSION: &str = "3.9";

pub const HEADER: &str = "# Automatically generated by mypy-config.\n#\n# To update, run mypy-config generate\n\n";

/// Modules with type hints known to be broken. Components listed here get
/// `ignore_errors = true` instead of strict checks.
pub const IGNORED_MODULES: &[&str] = &[
    "homeassistant.components.blueprint.*",
    "homeassistant.components.cloud.*",
    "homeassistant.components.config.*",
    "homeassistant.components.conversation.*",
    "homeassistant.components.deconz.*",
    "homeassistant.components.demo.*",
    "homeassistant.components.denonavr.*",
    "homeassistant.components.evohome.*",
    "homeassistant.components.fireservicerota.*",
    "homeassistant.components.firmata.*",
    "homeassistant.components.freebox.*",
    "homeassistant.components.geniushub.*",
    "homeassistant.components.google_assistant.*",
    "homeassistant.components.gree.*",
    "homeassistant.components.harmony.*",
    "homeassistant.components.hassio.*",
    "homeassistant.components.here_travel_time.*",
    "homeassistant.components.home_plus_control.*",
    "homeassistant.components.homekit.*",
    "homeassistant.components.homekit_controller.*",
    "homeassistant.components.honeywell.*",
    "homeassistant.components.icloud.*",
    "homeassistant.components.influxdb.*",
    "homeassistant.components.input_datetime.*",
    "homeassistant.components.isy994.*",
    "homeassistant.components.izone.*",
    "homeassistant.components.konnected.*",
    "homeassistant.components.kostal_plenticore.*",
    "homeassistant.components.litterrobot.*",
    "homeassistant.components.lovelace.*",
    "homeassistant.components.lutron_caseta.*",
    "homeassistant.components.lyric.*",
    "homeassistant.components.melcloud.*",
    "homeassistant.components.meteo_france.*",
    "homeassistant.components.minecraft_server.*",
    "homeassistant.components.mobile_app.*",
    "homeassistant.components.nest.legacy.*",
    "homeassistant.components.netgear.*",
    "homeassistant.components.nilu.*",
    "homeassistant.components.nzbget.*",
    "homeassistant.components.omnilogic.*",
    "homeassistant.components.onvif.*",
    "homeassistant.components.ozw.*",
    "homeassistant.components.philips_js.*",
    "homeassistant.components.plex.*",
    "homeassistant.components.profiler.*",
    "homeassistant.components.ring.*",
    "homeassistant.components.solaredge.*",
    "homeassistant.components.sonos.*",
    "homeassistant.components.spotify.*",
    "homeassistant.components.system_health.*",
    "homeassistant.components.telegram_bot.*",
    "homeassistant.components.template.*",
    "homeassistant.components.toon.*",
    "homeassistant.components.unifi.*",
    "homeassistant.components.upnp.*",
    "homeassistant.components.vizio.*",
    "homeassistant.components.withings.*",
    "homeassistant.components.xbox.*",
    "homeassistant.components.xiaomi_aqara.*",
    "homeassistant.components.xiaomi_miio.*",
    "homeassistant.components.yeelight.*",
    "homeassistant.components.zha.*",
    "homeassistant.components.zwave.*",
];

/// Global `[mypy]` options, in render order. `python_version` is prepended
/// from the effective configuration at render time.
pub const GENERAL_SETTINGS: &[(&str, &str)] = &[
    ("show_error_codes", "true"),
    ("follow_imports", "silent"),
    ("ignore_missing_imports", "true"),
    ("strict_equality", "true"),
    ("warn_incomplete_stub", "true"),
    ("warn_redundant_casts", "true"),
    ("warn_unused_configs", "true"),
    ("warn_unused_ignores", "true"),
];

/// The checks that `strict = true` would enable. mypy treats `strict = false`
/// in a narrower section as "unspecified" rather than "off", so the checks
/// are listed individually to allow flipping them wholesale per section.
pub const STRICT_SETTINGS: &[&str] = &[
    "check_untyped_defs",
    "disallow_incomplete_defs",
    "disallow_subclassing_any",
    "disallow_untyped_calls",
    "disallow_untyped_decorators",
    "disallow_untyped_defs",
    "no_implicit_optional",
    "warn_return_any",
    "warn_unreachable",
    // TODO: enable disallow_any_generics and no_implicit_reexport globally
    // once the remaining core modules pass them.
];

/// Additional checks layered on top of the general strict set for core
/// modules that opted in.
pub const STRICT_SETTINGS_CORE: &[&str] = &[
    "disallow_any_generics",
];
