use rand::Rng;

/// 邀请码字符集：大写字母与数字
pub const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 生成指定长度的随机邀请码
pub fn generate_random_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_shape() {
        for _ in 0..100 {
            let code = generate_random_code(6);
            assert_eq!(code.len(), 6);
            assert!(
                code.bytes().all(|b| CODE_CHARSET.contains(&b)),
                "unexpected code {code}"
            );
        }
    }

    #[test]
    fn test_generate_random_code_empty() {
        assert!(generate_random_code(0).is_empty());
    }
}
