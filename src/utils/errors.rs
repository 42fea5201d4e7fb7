/// Collapses a wallet or RPC error message into something short enough to
/// show a user.
pub fn short_error_message(message: &str) -> String {
    if message.is_empty() {
        return "Unknown error".to_string();
    }

    if message.contains("reverted") {
        let reason = message
            .split("reverted")
            .nth(1)
            .and_then(|rest| rest.split('.').next())
            .map(|rest| rest.trim().trim_start_matches(':').trim())
            .unwrap_or_default();

        if reason.contains("zero address") {
            return "Invalid address or no balance".to_string();
        }
        if reason.contains("exceeds balance") {
            return "Insufficient balance".to_string();
        }
        if reason.is_empty() {
            return "Transaction reverted".to_string();
        }
        return reason.to_string();
    }

    if message.contains("rejected") || message.contains("denied") {
        return "Transaction rejected by user".to_string();
    }

    "Operation failed".to_string()
}
