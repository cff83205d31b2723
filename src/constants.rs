pub mod api {

    pub const DATAJUD_BASE_URL: &str = "https://api-publica.datajud.cnj.jus.br";

    pub const RESEND_BASE_URL: &str = "https://api.resend.com";

    pub const USER_AGENT: &str = concat!("docket-watch/", env!("CARGO_PKG_VERSION"));
}

pub mod limits {

    pub const MAX_TITLE_CHARS: usize = 500;

    pub const DIGEST_SNIPPET_CHARS: usize = 200;

    pub const MAX_CASE_NUMBER_LEN: usize = 30;

    pub const MAX_TRIBUNAL_ALIAS_LEN: usize = 80;

    pub const MAX_EMAIL_LEN: usize = 255;

    pub const DEFAULT_HISTORY_LIMIT: u64 = 20;
}
