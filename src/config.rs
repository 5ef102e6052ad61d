/// The configuration parameters for the application.
#[derive(clap::Parser, Clone)]
pub struct Config {
    /// The signing secret of the slack app whose requests this service accepts.
    #[clap(long, env)]
    pub signing_secret: String,

    /// The PORT number for the server address.
    #[clap(long, env)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn it_should_parse_the_command_line_flags() {
        let config =
            Config::try_parse_from(["verifier", "--signing-secret", "xsecretx", "--port", "3000"])
                .unwrap();

        assert_eq!(config.signing_secret, "xsecretx");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn it_should_reject_a_port_out_of_range() {
        let result =
            Config::try_parse_from(["verifier", "--signing-secret", "xsecretx", "--port", "70000"]);

        assert!(result.is_err());
    }
}
