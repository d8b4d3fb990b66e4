use uuid::Uuid;

pub fn random_id() -> String {
    bs58::encode(Uuid::now_v7().as_bytes()).into_string()
}

#[cfg(test)]
mod tests {
    #[test]
    fn random_id() {
        let id = super::random_id();
        assert!(!id.is_empty());
        assert_ne!(id, super::random_id());
    }
}
