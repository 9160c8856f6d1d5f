use crate::error::NginxError;
use pkg_constants::nginx;
use pkg_types::ingress::IngressConfig;
use pkg_types::main_config::MainConfig;
use std::fmt::Write as _;

/// Model value handed to [`render`]; borrows the caller's configuration.
#[derive(Debug, Clone, Copy)]
pub enum TemplateData<'a> {
    Ingress(&'a IngressConfig),
    Main(&'a MainConfig),
}

impl TemplateData<'_> {
    fn kind(&self) -> &'static str {
        match self {
            TemplateData::Ingress(_) => "IngressConfig",
            TemplateData::Main(_) => "MainConfig",
        }
    }
}

/// Render a model value through the named template.
///
/// Pure and deterministic: no I/O, no hidden state, and sequences render
/// in the order given. nginx match precedence follows rendered order, so
/// the order in the model is preserved verbatim.
pub fn render(template: &str, data: TemplateData<'_>) -> Result<String, NginxError> {
    match (template, data) {
        (nginx::INGRESS_TEMPLATE, TemplateData::Ingress(config)) => Ok(render_ingress(config)),
        (nginx::MAIN_TEMPLATE, TemplateData::Main(config)) => Ok(render_main(config)),
        (nginx::INGRESS_TEMPLATE | nginx::MAIN_TEMPLATE, other) => Err(NginxError::Render {
            name: template.to_string(),
            model: other.kind(),
        }),
        _ => Err(NginxError::Template {
            name: template.to_string(),
        }),
    }
}

fn render_ingress(config: &IngressConfig) -> String {
    let mut out = String::new();

    for upstream in &config.upstreams {
        let _ = writeln!(out, "upstream {} {{", upstream.name);
        for server in &upstream.upstream_servers {
            let _ = writeln!(out, "    server {}:{};", server.address, server.port);
        }
        out.push_str("}\n\n");
    }

    for server in &config.servers {
        out.push_str("server {\n");
        out.push_str("    listen 80;\n");
        if server.ssl {
            out.push_str("    listen 443 ssl;\n");
            let _ = writeln!(out, "    ssl_certificate {};", server.ssl_certificate);
            let _ = writeln!(
                out,
                "    ssl_certificate_key {};",
                server.ssl_certificate_key
            );
        }
        let _ = writeln!(out, "    server_name {};", server.name);

        for location in &server.locations {
            out.push('\n');
            let _ = writeln!(out, "    location {} {{", location.path);
            let _ = writeln!(
                out,
                "        proxy_connect_timeout {};",
                location.proxy_connect_timeout
            );
            let _ = writeln!(
                out,
                "        proxy_read_timeout {};",
                location.proxy_read_timeout
            );
            let _ = writeln!(
                out,
                "        client_max_body_size {};",
                location.client_max_body_size
            );
            out.push_str("        proxy_set_header Host $host;\n");
            out.push_str("        proxy_set_header X-Real-IP $remote_addr;\n");
            out.push_str("        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;\n");
            if location.websocket {
                out.push_str("        proxy_http_version 1.1;\n");
                out.push_str("        proxy_set_header Upgrade $http_upgrade;\n");
                out.push_str("        proxy_set_header Connection \"upgrade\";\n");
            }
            let _ = writeln!(out, "        proxy_pass http://{};", location.upstream.name);
            out.push_str("    }\n");
        }
        out.push_str("}\n\n");
    }

    out
}

fn render_main(config: &MainConfig) -> String {
    let mut out = String::new();

    out.push_str("user nginx;\n");
    out.push_str("worker_processes auto;\n\n");
    out.push_str("error_log /var/log/nginx/error.log notice;\n");
    out.push_str("pid /var/run/nginx.pid;\n\n");
    out.push_str("events {\n    worker_connections 1024;\n}\n\n");
    out.push_str("http {\n");
    out.push_str("    include /etc/nginx/mime.types;\n");
    out.push_str("    default_type application/octet-stream;\n\n");
    let _ = writeln!(
        out,
        "    server_names_hash_max_size {};",
        config.server_names_hash_max_size
    );
    if !config.server_names_hash_bucket_size.is_empty() {
        let _ = writeln!(
            out,
            "    server_names_hash_bucket_size {};",
            config.server_names_hash_bucket_size
        );
    }
    out.push_str("\n    sendfile on;\n");
    out.push_str("    keepalive_timeout 65;\n\n");
    out.push_str("    include /etc/nginx/conf.d/*.conf;\n");
    out.push_str("}\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::server::{Location, Server};
    use pkg_types::upstream::{Upstream, UpstreamServer};

    fn sample() -> IngressConfig {
        let upstream = Upstream::new("svc-a", vec![UpstreamServer::new("10.0.0.5", "8080")]);
        IngressConfig {
            upstreams: vec![upstream.clone()],
            servers: vec![Server::new(
                "foo.example.com",
                vec![Location::new("/", upstream)],
            )],
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = sample();
        let first = render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        let second = render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ingress_text_contains_upstream_and_location() {
        let text = render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&sample())).unwrap();
        assert!(text.contains("upstream svc-a {"));
        assert!(text.contains("    server 10.0.0.5:8080;"));
        assert!(text.contains("server_name foo.example.com;"));
        assert!(text.contains("location / {"));
        assert!(text.contains("proxy_pass http://svc-a;"));
        assert!(!text.contains("ssl_certificate"));
    }

    #[test]
    fn blocks_render_in_model_order() {
        let config = IngressConfig {
            upstreams: vec![
                Upstream::with_default_server("zeta"),
                Upstream::with_default_server("alpha"),
            ],
            servers: vec![],
        };
        let text = render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        let zeta = text.find("upstream zeta").unwrap();
        let alpha = text.find("upstream alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn ssl_server_gets_tls_listener_and_cert_paths() {
        let mut config = sample();
        config.servers[0].ssl = true;
        config.servers[0].ssl_certificate = "/etc/nginx/ssl/foo.pem".into();
        config.servers[0].ssl_certificate_key = "/etc/nginx/ssl/foo.pem".into();
        let text = render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        assert!(text.contains("listen 443 ssl;"));
        assert!(text.contains("ssl_certificate /etc/nginx/ssl/foo.pem;"));
        assert!(text.contains("ssl_certificate_key /etc/nginx/ssl/foo.pem;"));
    }

    #[test]
    fn websocket_location_gets_upgrade_headers() {
        let mut config = sample();
        config.servers[0].locations[0].websocket = true;
        let text = render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        assert!(text.contains("proxy_http_version 1.1;"));
        assert!(text.contains("proxy_set_header Upgrade $http_upgrade;"));
        assert!(text.contains("proxy_set_header Connection \"upgrade\";"));
    }

    #[test]
    fn main_config_bucket_size_is_optional() {
        let mut config = MainConfig::default();
        let text = render(nginx::MAIN_TEMPLATE, TemplateData::Main(&config)).unwrap();
        assert!(text.contains("server_names_hash_max_size 512;"));
        assert!(!text.contains("server_names_hash_bucket_size"));
        assert!(text.contains("include /etc/nginx/conf.d/*.conf;"));

        config.server_names_hash_bucket_size = "128".into();
        let text = render(nginx::MAIN_TEMPLATE, TemplateData::Main(&config)).unwrap();
        assert!(text.contains("server_names_hash_bucket_size 128;"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let config = sample();
        let err = render("missing.tmpl", TemplateData::Ingress(&config)).unwrap_err();
        assert!(matches!(err, NginxError::Template { .. }));
    }

    #[test]
    fn mismatched_model_is_an_error() {
        let main = MainConfig::default();
        let err = render(nginx::INGRESS_TEMPLATE, TemplateData::Main(&main)).unwrap_err();
        assert!(matches!(err, NginxError::Render { .. }));
    }
}
