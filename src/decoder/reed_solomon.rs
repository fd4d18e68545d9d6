//! Reed-Solomon block decoding
//!
//! Syndromes, Berlekamp-Massey for the error locator, Chien search for
//! the error positions, Forney for the magnitudes, then a syndrome
//! revalidation. Corrects up to floor(t/2) codeword errors per block.

use crate::error::QrError;
use crate::gf256::Gf256;

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` ECC codewords.
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place; the slice holds data then ECC
    /// codewords, highest-degree coefficient first.
    pub fn decode(&self, received: &mut [u8]) -> Result<(), QrError> {
        let syndromes = self.calculate_syndromes(received);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(());
        }

        let sigma = self.find_error_locator(&syndromes)?;
        let degree = sigma.len() - 1;
        if degree > self.num_ecc_codewords / 2 {
            return Err(unrecoverable());
        }

        let positions = self.find_error_positions(&sigma, received.len())?;
        let magnitudes = self.find_error_magnitudes(&sigma, &syndromes, &positions, received.len())?;
        for (&pos, &magnitude) in positions.iter().zip(&magnitudes) {
            received[pos] ^= magnitude;
        }

        let syndromes = self.calculate_syndromes(received);
        if syndromes.iter().any(|&s| s != 0) {
            return Err(unrecoverable());
        }
        Ok(())
    }

    /// S_i = m(alpha^i), Horner from the highest-degree coefficient.
    fn calculate_syndromes(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                let x = Gf256::exp(i);
                received
                    .iter()
                    .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey; returns the locator with trailing zeros trimmed.
    fn find_error_locator(&self, syndromes: &[u8]) -> Result<Vec<u8>, QrError> {
        let mut sigma = vec![1u8];
        let mut prev_sigma = vec![1u8];
        let mut prev_delta = 1u8;
        let mut degree = 0usize;
        let mut gap = 1usize;

        for i in 0..syndromes.len() {
            let mut delta = syndromes[i];
            for j in 1..=degree.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndromes[i - j]);
            }

            if delta == 0 {
                gap += 1;
                continue;
            }

            let scale = Gf256::div(delta, prev_delta)?;
            let update_len = prev_sigma.len() + gap;
            let keep = 2 * degree <= i;
            let snapshot = sigma.clone();
            if sigma.len() < update_len {
                sigma.resize(update_len, 0);
            }
            for (j, &c) in prev_sigma.iter().enumerate() {
                sigma[j + gap] ^= Gf256::mul(scale, c);
            }
            if keep {
                prev_sigma = snapshot;
                prev_delta = delta;
                degree = i + 1 - degree;
                gap = 1;
            } else {
                gap += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        if sigma.len() - 1 != degree {
            return Err(unrecoverable());
        }
        Ok(sigma)
    }

    /// Chien search over every codeword position; the locator must have
    /// exactly as many roots as its degree.
    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, QrError> {
        let mut positions = Vec::new();
        for j in 0..n {
            let x_inv = Gf256::exp(255 - (n - 1 - j) % 255);
            let mut sum = 0u8;
            for (k, &coeff) in sigma.iter().enumerate() {
                sum ^= Gf256::mul(coeff, Gf256::pow(x_inv, k));
            }
            if sum == 0 {
                positions.push(j);
            }
        }
        if positions.len() != sigma.len() - 1 {
            return Err(unrecoverable());
        }
        Ok(positions)
    }

    /// Forney: e_j = X_j * omega(X_j^-1) / sigma'(X_j^-1), with
    /// omega = S * sigma mod x^t.
    fn find_error_magnitudes(
        &self,
        sigma: &[u8],
        syndromes: &[u8],
        positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, QrError> {
        let mut omega = vec![0u8; syndromes.len()];
        for (i, omega_i) in omega.iter_mut().enumerate() {
            for j in 0..=i.min(sigma.len() - 1) {
                *omega_i ^= Gf256::mul(sigma[j], syndromes[i - j]);
            }
        }

        let mut magnitudes = Vec::with_capacity(positions.len());
        for &pos in positions {
            let exponent = (n - 1 - pos) % 255;
            let x = Gf256::exp(exponent);
            let x_inv = Gf256::exp(255 - exponent);

            let mut omega_val = 0u8;
            for (k, &coeff) in omega.iter().enumerate() {
                omega_val ^= Gf256::mul(coeff, Gf256::pow(x_inv, k));
            }

            // Formal derivative: even-degree terms vanish in
            // characteristic 2.
            let mut sigma_prime = 0u8;
            for (k, &coeff) in sigma.iter().enumerate().skip(1).step_by(2) {
                sigma_prime ^= Gf256::mul(coeff, Gf256::pow(x_inv, k - 1));
            }
            if sigma_prime == 0 {
                return Err(unrecoverable());
            }

            magnitudes.push(Gf256::mul(x, Gf256::div(omega_val, sigma_prime)?));
        }
        Ok(magnitudes)
    }
}

fn unrecoverable() -> QrError {
    QrError::UnrecoverableBlock { block: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::reed_solomon::ReedSolomonEncoder;

    fn encode(data: &[u8], num_ecc: usize) -> Vec<u8> {
        let mut codeword = data.to_vec();
        codeword.extend(ReedSolomonEncoder::new(num_ecc).ecc_block(data).unwrap());
        codeword
    }

    #[test]
    fn test_decode_clean_block() {
        let data = vec![0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut codeword = encode(&data, 10);
        let decoder = ReedSolomonDecoder::new(10);
        assert!(decoder.decode(&mut codeword).is_ok());
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_correct_single_error() {
        let data = vec![0x00; 10];
        let mut codeword = encode(&data, 10);
        codeword[3] ^= 0xAB;

        let decoder = ReedSolomonDecoder::new(10);
        assert!(decoder.decode(&mut codeword).is_ok());
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_correct_errors_up_to_bound() {
        let data = vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        let mut codeword = encode(&data, 10);
        // floor(10/2) = 5 errors are correctable.
        for (i, flip) in [(0, 0xFF), (3, 0x42), (7, 0x13), (10, 0x99), (15, 0x01)] {
            codeword[i] ^= flip;
        }

        let decoder = ReedSolomonDecoder::new(10);
        assert!(decoder.decode(&mut codeword).is_ok());
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_fails_past_bound() {
        // t = 17 corrects 8 errors; 9 must fail. With minimum distance
        // t + 1 = 18, nine flips can never land within 8 of another
        // codeword, so the failure is certain rather than probabilistic.
        let data = vec![0x5A; 9];
        let mut codeword = encode(&data, 17);
        for i in 0..9 {
            codeword[i * 2] ^= 0x80 + i as u8;
        }

        let decoder = ReedSolomonDecoder::new(17);
        assert!(decoder.decode(&mut codeword).is_err());
    }

    #[test]
    fn test_corrects_eight_of_seventeen() {
        let data = vec![0x5A; 9];
        let mut codeword = encode(&data, 17);
        for i in 0..8 {
            codeword[i * 3] ^= 0x11 + i as u8;
        }

        let decoder = ReedSolomonDecoder::new(17);
        assert!(decoder.decode(&mut codeword).is_ok());
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_correct_errors_in_ecc_part() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        let mut codeword = encode(&data, 8);
        let total = codeword.len();
        codeword[total - 1] ^= 0xFF;
        codeword[total - 2] ^= 0x33;

        let decoder = ReedSolomonDecoder::new(8);
        assert!(decoder.decode(&mut codeword).is_ok());
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_all_zero_block_is_valid() {
        let mut block = vec![0u8; 16];
        let decoder = ReedSolomonDecoder::new(10);
        assert!(decoder.decode(&mut block).is_ok());
    }
}
