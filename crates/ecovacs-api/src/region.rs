// Region resolution
//
// Maps account country/continent onto the regional portal host. Mainland
// China accounts use the bare `portal` host; everyone else is routed by
// continent token.

use url::Url;

use crate::error::Error;
use crate::models::Configuration;

/// Continent token used when a country has no dedicated regional portal.
pub const DEFAULT_CONTINENT: &str = "ww";

/// Map a lower-case ISO-3166 alpha-2 country code to the portal's
/// continent token.
pub fn continent_for(country: &str) -> &'static str {
    match country {
        // Europe
        "ad" | "al" | "at" | "ba" | "be" | "bg" | "by" | "ch" | "cy" | "cz" | "de" | "dk"
        | "ee" | "es" | "fi" | "fo" | "fr" | "gb" | "gi" | "gr" | "hr" | "hu" | "ie" | "is"
        | "it" | "li" | "lt" | "lu" | "lv" | "mc" | "md" | "me" | "mk" | "mt" | "nl" | "no"
        | "pl" | "pt" | "ro" | "rs" | "ru" | "se" | "si" | "sk" | "sm" | "ua" | "uk" | "va" => {
            "eu"
        }
        // North America
        "ca" | "mx" | "us" | "pr" => "na",
        // Asia / Pacific
        "ae" | "au" | "bd" | "cn" | "hk" | "id" | "il" | "in" | "jp" | "kr" | "kz" | "my"
        | "nz" | "ph" | "sa" | "sg" | "th" | "tr" | "tw" | "vn" => "as",
        _ => DEFAULT_CONTINENT,
    }
}

/// Resolve `path` against the regional portal API root for `config`.
///
/// `path` follows URL-join semantics: a relative path replaces the last
/// segment of `https://<subdomain>.ecouser.net/api/`, an absolute one
/// replaces the whole path.
pub fn resolve_portal_url(config: &Configuration, path: &str) -> Result<Url, Error> {
    let base = portal_base(config)?;
    Ok(base.join(path)?)
}

fn portal_base(config: &Configuration) -> Result<Url, Error> {
    let subdomain = if config.country() == "cn" {
        "portal".to_owned()
    } else {
        format!("portal-{}", config.continent())
    };
    Ok(Url::parse(&format!("https://{subdomain}.ecouser.net/api/"))?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn china_uses_bare_portal_host() {
        let config = Configuration::new("cn", "client");
        let url = resolve_portal_url(&config, "appsvr/app.do").unwrap();
        assert_eq!(url.host_str(), Some("portal.ecouser.net"));
        assert_eq!(url.as_str(), "https://portal.ecouser.net/api/appsvr/app.do");
    }

    #[test]
    fn other_countries_use_continent_host() {
        let config = Configuration::new("us", "client").with_continent("na");
        let url = resolve_portal_url(&config, "iot/devmanager.do").unwrap();
        assert_eq!(url.host_str(), Some("portal-na.ecouser.net"));
        assert_eq!(url.path(), "/api/iot/devmanager.do");
    }

    #[test]
    fn absolute_path_replaces_api_root() {
        let config = Configuration::new("de", "client");
        let url = resolve_portal_url(&config, "/v1/private/login").unwrap();
        assert_eq!(url.as_str(), "https://portal-eu.ecouser.net/v1/private/login");
    }

    #[test]
    fn unknown_country_falls_back_to_worldwide() {
        assert_eq!(continent_for("br"), DEFAULT_CONTINENT);
        assert_eq!(continent_for("za"), "ww");
        let url = resolve_portal_url(&Configuration::new("br", "client"), "x").unwrap();
        assert_eq!(url.host_str(), Some("portal-ww.ecouser.net"));
    }

    #[test]
    fn known_countries_map_to_continents() {
        assert_eq!(continent_for("de"), "eu");
        assert_eq!(continent_for("us"), "na");
        assert_eq!(continent_for("jp"), "as");
    }
}
