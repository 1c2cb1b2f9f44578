use agora_client::{api::Error, RestBackend};

use crate::LoginInfo;

pub fn backend(login: &LoginInfo) -> RestBackend {
    RestBackend::new(crate::CLIENT.clone(), &login.host, login.api_key.clone())
        .with_session(login.session())
}

/// Signs in if an email is given, otherwise connects anonymously
pub async fn connect(
    host: String,
    api_key: String,
    email: String,
    password: String,
) -> Result<LoginInfo, Error> {
    let mut login = LoginInfo {
        host,
        api_key,
        session: None,
    };
    if !email.trim().is_empty() {
        let session = backend(&login).sign_in(email.trim(), &password).await?;
        login.session = Some(session);
    }
    Ok(login)
}
