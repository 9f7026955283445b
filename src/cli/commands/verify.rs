use std::path::Path;

use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::errors::{PushGuardError, Result};
use crate::core::models::verification::SignatureVerification;
use crate::core::models::verification_key::VerificationKey;
use crate::core::services::signature_verifier::SignatureVerifier;
use crate::core::traits::key_provider::KeyProvider;

/// Execute the `pushguard verify` command.
///
/// Succeeds only for a `valid` verdict; any other verdict is returned as
/// an error so the exit status is non-zero.
pub fn execute(subject: &str, signature: &str) -> Result<()> {
    let project = Project::open()?;
    let keys = project.key_provider()?;

    let subject_bytes = read_input(subject)?;
    let signature_bytes = read_input(signature)?;

    output::header("pushguard verify");

    let key = snapshot_key(&keys);
    let verdict = SignatureVerifier.verify_with(&key, &subject_bytes, &signature_bytes);
    report_verdict(verdict, key.as_ref())
}

/// Read a subject or signature file, mapping absence to `FileNotFound`.
pub fn read_input(path: &str) -> Result<Vec<u8>> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(PushGuardError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read(path)?)
}

/// Read the current key exactly once. The result is both checked against
/// and reported, so a key file replaced mid-command cannot split the two.
pub fn snapshot_key<K: KeyProvider + ?Sized>(keys: &K) -> Option<VerificationKey> {
    match keys.current_verification_key() {
        Ok(key) => key,
        Err(e) => {
            output::warning(&format!("Key file unusable: {e}"));
            None
        }
    }
}

/// Print the verdict and turn anything but `Valid` into an error.
pub fn report_verdict(verdict: SignatureVerification, key: Option<&VerificationKey>) -> Result<()> {
    match verdict {
        SignatureVerification::Valid => {
            let fingerprint = key
                .map(|k| format!("{} {}", k.scheme(), k.fingerprint()))
                .unwrap_or_default();
            output::success(&format!("Signature valid ({fingerprint})"));
            Ok(())
        }
        SignatureVerification::Invalid => Err(PushGuardError::SignatureRejected {
            verdict: verdict.to_string(),
        }),
        SignatureVerification::KeyUnavailable => {
            output::warning("No verification key installed");
            Err(PushGuardError::SignatureRejected {
                verdict: verdict.to_string(),
            })
        }
    }
}
