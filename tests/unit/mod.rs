mod http_transport;
mod services;
mod support;
