//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpStatePorts;

/// Everything [`super::create_server`] needs to bind and serve.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: HttpStatePorts,
}

impl ServerConfig {
    /// Combine validated session settings with the store ports to serve.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, ports: HttpStatePorts) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            ports,
        }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
