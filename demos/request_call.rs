use std::io;

use telesign::{
    CountryCode, Credentials, Language, RawPhoneNumber, TelesignClient, VerifyOptions,
    VerifyRequest,
};

fn required_var(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let customer_id = required_var("TELESIGN_CUSTOMER_ID")?;
    let authentication_id = required_var("TELESIGN_AUTHENTICATION_ID")?;
    let country_code = required_var("TELESIGN_COUNTRY_CODE")?;
    let phone = required_var("TELESIGN_PHONE")?;

    let language = std::env::var("TELESIGN_LANGUAGE")
        .ok()
        .map(Language::new)
        .transpose()?;

    let client = TelesignClient::new(Credentials::new(customer_id, authentication_id)?);
    let request = VerifyRequest::new(
        CountryCode::new(country_code)?,
        RawPhoneNumber::new(phone)?,
        VerifyOptions { language },
    );

    // This places a real phone call to TELESIGN_PHONE.
    let verification = client.request_call(request).await?;
    println!(
        "code: {}, reference id: {}",
        verification.code,
        verification.reference_id.as_str()
    );

    Ok(())
}
