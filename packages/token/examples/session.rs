//! Issue and verify a session token carrying custom claims

use chrono::{Duration, Utc};
use cryypt_token::{Claims, Handler, JwtResult, PublicClaims, ValidateExp, ValidateNbf};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    public: PublicClaims,
    #[serde(rename = "uid")]
    user_id: String,
}

impl Claims for SessionClaims {
    fn expiration(&self) -> Option<&dyn ValidateExp> {
        Some(&self.public)
    }

    fn not_before(&self) -> Option<&dyn ValidateNbf> {
        Some(&self.public)
    }
}

fn main() -> JwtResult<()> {
    const SIGNING_SECRET: &[u8] = b"3U5o3Z#XqfLpr3pjGknwWa^u6)CCo&&G";

    let handler = Handler::<SessionClaims>::builder()
        .with_algorithm("HS512")
        .with_secret(SIGNING_SECRET)
        .build()?;

    let mut claims = SessionClaims {
        user_id: "221905671296253953".to_string(),
        ..SessionClaims::default()
    };
    claims.public.iss = "jwt example".to_string();
    claims.public.set_iat_now();
    claims.public.set_exp_duration(Duration::minutes(15));
    claims.public.set_nbf_time(Utc::now() - Duration::seconds(1));

    let token = handler.encode_and_sign(&claims)?;
    println!("Token generated: {token}");

    let recovered = handler.decode_and_validate(&token)?;
    println!("Recovered claims: {recovered:?}");
    Ok(())
}
