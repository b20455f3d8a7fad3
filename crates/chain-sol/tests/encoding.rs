//! Wire-format tests against captured transactions and the upstream SDK's
//! reference vectors.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use chain_sol::programs::memo::{TransferMemo, TransferType};
use chain_sol::programs::system::AdvanceNonce;
use chain_sol::programs::timelock::{BurnDustWithAuthority, TransferWithAuthority, Withdraw};
use chain_sol::{
    AccountMeta, AddressLookupTable, Instruction, Message, SolanaTransaction,
};
use wallet_core::{Hash, KeyPair, PublicKey, Seed32};

/// Captured timelock transfer: AdvanceNonce → Memo → TransferWithAuthority.
const TIMELOCK_TRANSFER: &str = "AqWNqWCdgbzlWTVZQB7+iBg52O9A8107s/pfQ/Z2FndWizwNXukZioklvScCgQTZFr2f3eg4ojfEvpiZqwm9+wAiQGg5UsZEf/DjuHrnZr7YxHl0dIZexmPtmpgOdI69G7YVGSk2rE3sLk+65GeFUoDhpq7tzxP9W6nWzI5/5HQHAgEGCwksDha4qmHvDLlGQXd2cjb/PDR7UoWkLijNmnwnO1nuu7Xnafr2nnC0//MZTieqGWg8ygCot6SYJVjyndZCxGoaDXxcmpoifit1bsGjzYQ/vWUcn2k/tEUOjKQmrm5eKRu4eednzoBrNKpxRazVlEwA0hfWw9AnV3fGaPVtKli874Pwj2BfKXqwWqg0L7RsCDBgdqH2i6hMyNuRTnhIR1sGp9UXGSxWjuCKhF9z0peIzwNcMUWyGrNE2AYuqUAAAAbd9uHXZaGT2cvhRs7reawctIXtX1s3kTqM9YV+/wCp58J2lG1wb0LqCFPN9+Fla+HyGz75GCqQaZxuRH8yyfEAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAVKU1D4XciC1hSlVnJ4iilt3x6rq9CmBniISTL07vagDT/Zr02LPzD6xb5Nf2x4+R0n7wWJyKAfah6AyAlWXFf4ixn10XVBBNgH+xMmt/5cXJ6W7m1U9liIi4o8EvBHfAMIAwQFAAQEAAAACQAsWlRBRUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQT0KCAcCAQADAAYIEUSA3sCBRUel/0ANAwAAAAAA";

/// Captured close-dormant flow: AdvanceNonce → Memo → Revoke → Deactivate →
/// Withdraw → CloseAccounts.
const CLOSE_DORMANT_ACCOUNT: &str = "Ag83S4kpkDdVCkjHoQMbY1PFlHQuN4iNc0HvKRY4GAYtS2fJg2sD0pTswcXX80wQ0l1LNzfEPMFq1L65zh3ZqAMalMR4K8eVSOb2026zqdo2y+jtsqXZUwLXo5u7kpxcQdesl0RyvYFW5TtfOahNZEmt130Bqr7JW52XByUWOMUFAgEFCwksDha4qmHvDLlGQXd2cjb/PDR7UoWkLijNmnwnO1nuymNnIuP7iSQN87RAiXXExCM/rcMSDk1ufucz1QBgrMsQi2SY08yHh0QVR56YXP/W3hU8rVeYaNQ3Pou62KeUaMXihwH1Rl/jONnj6X35HTZ5IaCcgRGCf5ejrg2iOClK2CjKDyXQ3p6u/9OZeYr/MDJt3dfzYPPo50L/Nl89J5fiWbl2YMre3ew8o0M5ZWp069OdcB1BTXvdFHPVb8kEggan1RcZLFaO4IqEX3PSl4jPA1wxRbIas0TYBi6pQAAABt324ddloZPZy+FGzut5rBy0he1fWzeROoz1hX7/AKkAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAVKU1D4XciC1hSlVnJ4iilt3x6rq9CmBniISTL07vagDT/Zr02LPzD6xb5Nf2x4+R0n7wWJyKAfah6AyAlWXFdklqEX6a61ZsH0qvimrsORM6Wqr1q/dAdLEVNifIlQSgYIAwIGAAQEAAAACQAsWlRBRUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQT0KBgQDAAAHCAnltTryqwjJkP8KAwQBAAkscCGscRyODf8KBwQDAQUABwgJtxJGnJRtoSL/CgYEAwAABwgJq95e6SL6ygH/";

/// Captured close-empty flow: AdvanceNonce → BurnDust → CloseAccounts.
const CLOSE_EMPTY_ACCOUNT: &str = "AliNx0Qd/Yh3rxDOm7tP6Nk5F/kIqkBCgUxtiPXbPa4hI/lPvnFu2R1kOUPSVyXfukFkhWVmVMbAhPsC1julZQZgPnBJozuXsURdMLy8FyhML7D4H0v1fhCHQJMOoAORJO75IeFbekkBWFFZZK+TOhBApSCQK4uEdjv7lyhK7dEDAgEECgksDha4qmHvDLlGQXd2cjb/PDR7UoWkLijNmnwnO1nuAwAkc+jnVXSj6mVi3qDSxmtMOwdDpQZWwcrlIreF0/0B6uU3GHXrot2xFmpofLZ+RJ3k0x3D0yyzG7HtV5blAgszOKCrLMhB1bAUvGo891YpGHSzGclRfZu/qeTpZh75/IUvnzG1DltbSH1irqx2Cyh7SroxvAgiqc8rXoqDGHz/5wv1HyDU2Q6Ue0j8NoyFFNuy3gehalCj+lmXjCqUuQan1RcZLFaO4IqEX3PSl4jPA1wxRbIas0TYBi6pQAAABt324ddloZPZy+FGzut5rBy0he1fWzeROoz1hX7/AKkAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA0/2a9Niz8w+sW+TX9sePkdJ+8FicigH2oegMgJVlxXnFoL9tCTU/3A8XPsFV4gd1BbGTdFQhiF05WPGERPmJIDCAMFBgAEBAAAAAkIBAIBAAMABwgRJyr/2g58Ti3/oIYBAAAAAAAJBgQCAAAHCAmr3l7pIvrKAf8=";

/// Captured token transfer: AdvanceNonce → Memo → Token Transfer.
const SIMPLE_TRANSFER: &str = "A1tAcqFQvsLAwkzzR6IyioVR7RanubupIBmSTJLmVRgehHpCXA4vw1iydd/nXGRM2MFkcOO486sPbY/t5YkcoQ+HczaWQofwtUOGMXOaitdnW4QV2IrNouP7OekZ5X/nrVTaMNsRldU4hDKv4TpBW5ZtUuMxNj+K0hYaiOhe0bwAe03tCXMy5w2tn22FQRD98vyOk9lllvhOiNvrz2MkQBrKyGZkvFx+GxzIr2JjKp2ZcLiYQAabpKmmqae3WbejDAMBBAkJLA4WuKph7wy5RkF3dnI2/zw0e1KFpC4ozZp8JztZ7gu8C2nMEidsVQv64veR8KGN+uSVB8t3QXls8pS1g3hpYe7aeLzQPu4s5+1/zFV3d0sA+QjBW17I1Gz2kSOyqk7bfkolDNcGZ49pe8RELDOdW6UGljTmveo3XvKO0SSYDPFod1RaA9JNk/lmcAnsZEkxtqcuUgnkYIlTqbFPislJBqfVFxksVo7gioRfc9KXiM8DXDFFshqzRNgGLqlAAAAFSlNQ+F3IgtYUpVZyeIopbd8eq6vQpgZ4iEky9O72oAbd9uHXZaGT2cvhRs7reawctIXtX1s3kTqM9YV+/wCpAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAB9c5VBOZKF0Rkn4tPQFamDoUjF8oa04karh4ZnmDORpgMIAwEFAAQEAAAABgAsWlRBRUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQT0HAwQDAgkDoIYBAAAAAAA=";

/// Captured account creation: AdvanceNonce → Timelock Initialize.
const TIMELOCK_CREATE_ACCOUNT: &str = "AgAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAgAHCwksDha4qmHvDLlGQXd2cjb/PDR7UoWkLijNmnwnO1nuN8DXVqgdQXIsX+LDS9MUe8jvjg/Ff6Vj6VZaNxer98K8yIAO97UcHAd2xm4zfG8AtfQDMyT8/7QC0Sen9vq/lgSaWxmcYQR245MI8/QpznC4B3qZptwxn5SBWI9Bizr8PKg85sywGzAYembl67Ega1GZSC7hiY7u3Yz/akHwTAoGp9UXGSxWjuCKhF9z0peIzwNcMUWyGrNE2AYuqUAAAAan1RcZLFxRIYzJTD1K8X9Y2u4Im6H9ROPb2YoAAAAACzM4oKssyEHVsBS8ajz3VikYdLMZyVF9m7+p5OlmHvkG3fbh12Whk9nL4UbO63msHLSF7V9bN5E6jPWFfv8AqQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAADT/Zr02LPzD6xb5Nf2x4+R0n7wWJyKAfah6AyAlWXFeo9TwTAtFbaDGnTWWclU2+wNsZXm1C/+ztSBss80USmAIKAwEFAAQEAAAACgoJAgMEBwAACAkGEK+vbR8NmJvtgK8bAAAAAAA=";

/// Reference transaction generated by the upstream SDK's transaction tests.
const CROSS_IMPL: &str = "ATMfBMZ8phHEheLph8K9TJhRKhnE4qNZvWiXdUdJRmlTCRsQjWmW2CkQJeRHBCcsqFm2gynjL40M9mTe0Dxp4QIBAAEDfEya6wnC7f3Cv53qnOEywwIJ928rIdqAlfXYI1adXroBAQEEBQYHCAkJCQkJCQkJCQkJCQkJCQkIBwYFBAEBAQICAgQFBgcICQEBAQEBAQEBAQEBAQEBCQgHBgUEAgICAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABAgIAAQMBAgM=";

/// Captured v0 transaction with two lookup tables.
const VERSIONED_TRANSFER: &str = "Abyp+nvyM7ZEdWoZTeADD5Cz8QJVVjhTr6CnzVj/CX2MwosyMNzT0tVNJ3gIUo8qxW8V+KclAAntCexlsvc2TQiAAQAEBYNezk00yE7eeJ8KVQSTMRnfgqKr2TuCkI2OvY6VqupmBqfVFxksVo7gioRfc9KXiM8DXDFFshqzRNgGLqlAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAMGRm/lIRcy/+ytunLDm+e8jOW7xfcSayxDmzpAAAAAmu3bzcyfl+oHt1b29uzQvgBqO8OA3K6s5S0u4S+oQYqcHxhrhTySMLI0fOjClaCEkXjCshHIi9E63Co6m/5ZfgQCAwcBAAQEAAAAAwAFAkANAwADAAkD6AMAAAAAAAAEBQUGCAkKCgABAgMEBQYHCAkBtCdbdeueeYQHgQ6Wzm4pItAtbgGigO5L8M2bbV6t3zoDAgMAAwQFBg==";

fn decode_fixture(base64_text: &str) -> (SolanaTransaction, Vec<u8>) {
    let raw = BASE64.decode(base64_text).unwrap();
    let tx = SolanaTransaction::decode(&raw).unwrap();
    (tx, raw)
}

fn key_pairs(range: std::ops::Range<usize>) -> Vec<KeyPair> {
    const SEEDS: &[&str] = &[
        "ec7014c260ea0d1b7c94e20e647514f4b1a327f2ee589d0b08f484d99431f315",
        "4939003d35acc5cd2d50b4bd0dd094acea1add90eda1ebba94260cd85fcf36e1",
        "e6e0895e22a6f9eb7c35e04f110223b314a0dfe74508253cc702020135b609c6",
        "8a81bc0c3f313ce56c564b0ef5730c033883e81bbf25ba636b00c8a6f4dae856",
        "b18179a3bd36568e8b28c7e0174ecdd0916163fb02a720757a70284470363dd6",
        "7284328767e310a0ca293e48f863141b2ab6a2e7e3e266fcc4ccd579ed17cc29",
        "2d02e6304fffcda39c856acb6b8c4556e558eee4d4cbd27102a8cbfeb12f85db",
        "2765eca4213fa5fd330f065dd561969af71cb5e00529f18473e530311929697b",
        "cf1c6411ff7670e6a99c962e09fb8da1cd586669e5709e9fae7cf811eda73410",
    ];
    SEEDS[range]
        .iter()
        .map(|seed_hex| {
            let mut seed = [0u8; 32];
            hex::decode_to_slice(seed_hex, &mut seed).unwrap();
            KeyPair::from_seed(Seed32::new(seed))
        })
        .collect()
}

// ─── Fixture round trips ─────────────────────────────────────────────

#[test]
fn fixtures_round_trip_byte_exact() {
    for fixture in [
        TIMELOCK_TRANSFER,
        CLOSE_DORMANT_ACCOUNT,
        CLOSE_EMPTY_ACCOUNT,
        TIMELOCK_CREATE_ACCOUNT,
        SIMPLE_TRANSFER,
        CROSS_IMPL,
        VERSIONED_TRANSFER,
    ] {
        let (tx, raw) = decode_fixture(fixture);
        assert_eq!(tx.encode(), raw, "fixture must re-encode byte-exact");
    }
}

#[test]
fn versioned_fixture_decodes_as_v0() {
    let (tx, _) = decode_fixture(VERSIONED_TRANSFER);
    let Message::V0(message) = &tx.message else {
        panic!("expected a v0 message");
    };
    assert_eq!(message.address_table_lookups.len(), 1);
    assert_eq!(tx.signatures.len(), 1);
}

// ─── Instruction decode fidelity ─────────────────────────────────────

#[test]
fn transfer_fixture_decodes_transfer_with_authority() {
    let (tx, _) = decode_fixture(TIMELOCK_TRANSFER);

    let transfer: TransferWithAuthority = tx.find_instruction().unwrap();
    assert_eq!(transfer.bump, 255);
    assert_eq!(transfer.quarks, 200_000); // 2 whole units

    let advance: AdvanceNonce = tx.find_instruction().unwrap();
    assert_eq!(
        advance.nonce.to_base58(),
        "H7y8REaqickypzCfke3onJVKbbp8ELmaccFYeLZzJ2Wn"
    );
    assert_eq!(
        advance.authority.to_base58(),
        "codeHy87wGD5oMRLG75qKqsSi1vWE3oxNyYmXo5F9YR"
    );

    let memo: TransferMemo = tx.find_instruction().unwrap();
    assert_eq!(memo.transfer_type, TransferType::P2p);
    assert_eq!(memo.app_index, 268);
}

#[test]
fn close_empty_fixture_decodes_burn_dust() {
    let (tx, _) = decode_fixture(CLOSE_EMPTY_ACCOUNT);

    let burn: BurnDustWithAuthority = tx.find_instruction().unwrap();
    assert_eq!(burn.bump, 255);
    assert_eq!(burn.max_quarks, 100_000); // 1 whole unit
    assert_eq!(
        burn.mint.to_base58(),
        "kinXdEcpDQeHPEuQnqmUgtYykqKGVFq6CeVX5iAHJq6"
    );
}

#[test]
fn simple_transfer_fixture_decodes_token_transfer() {
    use chain_sol::programs::token::Transfer;

    let (tx, _) = decode_fixture(SIMPLE_TRANSFER);

    let transfer: Transfer = tx.find_instruction().unwrap();
    assert_eq!(transfer.quarks, 100_000); // 1 whole unit
    assert_eq!(
        transfer.source.to_base58(),
        "HFMeSarShcvgKARwwMTS6WafuRzhW1BPRsWzo3WEa4FS"
    );
    assert_eq!(
        transfer.destination.to_base58(),
        "FmoyfcoDYya27XtJcZUKtnXRn6RKNA8yrApkf88DcKvj"
    );
}

#[test]
fn close_dormant_fixture_decodes_withdraw() {
    let (tx, _) = decode_fixture(CLOSE_DORMANT_ACCOUNT);

    let withdraw: Withdraw = tx.find_instruction().unwrap();
    assert_eq!(withdraw.bump, 255);
    assert_eq!(
        withdraw.destination.to_base58(),
        "GEaVZeZ52Jn8xHPy4VKaXsHQ34E6pwfJGuYh8EsYQi6M"
    );
}

// ─── Cross-implementation vector ─────────────────────────────────────

#[test]
fn transaction_cross_impl() {
    let mut seed = [0u8; 32];
    hex::decode_to_slice(
        "3053020101300506032b657004220420ff6524187c17a71584cc9b05b93a794b",
        &mut seed,
    )
    .unwrap();
    let key_pair = KeyPair::from_seed(Seed32::new(seed));

    let program = PublicKey::new([
        2, 2, 2, 4, 5, 6, 7, 8, 9, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 9, 8, 7, 6, 5, 4, 2,
        2, 2,
    ]);
    let to = PublicKey::new([
        1, 1, 1, 4, 5, 6, 7, 8, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 8, 7, 6, 5, 4, 1,
        1, 1,
    ]);

    let mut tx = SolanaTransaction::new(
        key_pair.public_key(),
        None,
        vec![Instruction::new(
            program,
            vec![
                AccountMeta::writable_signer(key_pair.public_key()),
                AccountMeta::writable(to),
            ],
            vec![1, 2, 3],
        )],
    );
    tx.sign(&[&key_pair]).unwrap();

    assert_eq!(BASE64.encode(tx.encode()), CROSS_IMPL);
}

// ─── Account ordering ────────────────────────────────────────────────

#[test]
fn transaction_single_instruction() {
    let mut keys = key_pairs(0..2);
    let payer = keys.remove(0);
    let program = keys.remove(0);

    let keys = key_pairs(2..6);
    let data = vec![1, 2, 3];

    let instruction_accounts = vec![
        AccountMeta::readonly_signer(keys[0].public_key()),
        AccountMeta::readonly(keys[1].public_key()),
        AccountMeta::writable(keys[2].public_key()),
        AccountMeta::writable_signer(keys[3].public_key()),
    ];

    let mut tx = SolanaTransaction::new(
        payer.public_key(),
        None,
        vec![Instruction::new(
            program.public_key(),
            instruction_accounts.clone(),
            data.clone(),
        )],
    );

    // Intentionally sign out of order to ensure placement is fixed.
    let signatures = tx.sign(&[&keys[0], &keys[3], &payer]).unwrap();

    assert_eq!(tx.signatures.len(), 3);
    let header = tx.message.header();
    assert_eq!(header.required_signatures, 3);
    assert_eq!(header.readonly_signers, 1);
    assert_eq!(header.readonly, 2);

    let message = tx.message.encode();
    assert!(payer.verify(&tx.signatures[0], &message));
    assert!(keys[3].verify(&tx.signatures[1], &message));
    assert!(keys[0].verify(&tx.signatures[2], &message));

    assert!(keys[0].verify(&signatures[0], &message));
    assert!(keys[3].verify(&signatures[1], &message));
    assert!(payer.verify(&signatures[2], &message));

    let account_keys = tx.message.account_keys();
    assert_eq!(account_keys[0], payer.public_key());
    assert_eq!(account_keys[1], keys[3].public_key());
    assert_eq!(account_keys[2], keys[0].public_key());
    assert_eq!(account_keys[3], keys[2].public_key());
    assert_eq!(account_keys[4], keys[1].public_key());
    assert_eq!(account_keys[5], program.public_key());
}

#[test]
fn transaction_duplicate_keys_merge_permissions() {
    let mut base = key_pairs(0..2);
    let payer = base.remove(0);
    let program = base.remove(0);

    let keys = key_pairs(2..6);
    let data = vec![1, 2, 3];

    // keys[0]: readonly signer -> writable signer
    // keys[1]: readonly        -> readonly signer
    // keys[2]: writable        -> writable  (readonly mention is a no-op)
    // keys[3]: writable signer -> writable signer (no-op)
    let instruction_accounts = vec![
        AccountMeta::readonly_signer(keys[0].public_key()),
        AccountMeta::readonly(keys[1].public_key()),
        AccountMeta::writable(keys[2].public_key()),
        AccountMeta::writable_signer(keys[3].public_key()),
        AccountMeta::writable(keys[0].public_key()),
        AccountMeta::readonly_signer(keys[1].public_key()),
        AccountMeta::readonly(keys[2].public_key()),
        AccountMeta::readonly(keys[3].public_key()),
    ];

    let mut tx = SolanaTransaction::new(
        payer.public_key(),
        None,
        vec![Instruction::new(
            program.public_key(),
            instruction_accounts,
            data,
        )],
    );

    tx.sign(&[&keys[0], &keys[1], &keys[3], &payer]).unwrap();

    assert_eq!(tx.signatures.len(), 4);
    let header = tx.message.header();
    assert_eq!(header.required_signatures, 4);
    assert_eq!(header.readonly_signers, 1);
    assert_eq!(header.readonly, 1);

    let message = tx.message.encode();
    assert!(payer.verify(&tx.signatures[0], &message));
    assert!(keys[0].verify(&tx.signatures[1], &message));
    assert!(keys[3].verify(&tx.signatures[2], &message));
    assert!(keys[1].verify(&tx.signatures[3], &message));

    let account_keys = tx.message.account_keys();
    assert_eq!(account_keys[0], payer.public_key());
    assert_eq!(account_keys[1], keys[0].public_key());
    assert_eq!(account_keys[2], keys[3].public_key());
    assert_eq!(account_keys[3], keys[1].public_key());
    assert_eq!(account_keys[4], keys[2].public_key());
    assert_eq!(account_keys[5], program.public_key());
}

#[test]
fn transaction_multi_instruction() {
    let mut base = key_pairs(0..3);
    let payer = base.remove(0);
    let program = base.remove(0);
    let program2 = base.remove(0);

    let keys = key_pairs(3..9);
    let data = vec![1, 2, 3];
    let data2 = vec![3, 4, 5];

    let instruction_accounts = vec![
        AccountMeta::readonly_signer(keys[0].public_key()),
        AccountMeta::readonly(keys[1].public_key()),
        AccountMeta::writable(keys[2].public_key()),
        AccountMeta::writable_signer(keys[3].public_key()),
    ];
    let instruction2_accounts = vec![
        // Ensure keys don't get downgraded in permissions
        AccountMeta::readonly(keys[3].public_key()),
        AccountMeta::readonly(keys[2].public_key()),
        // Ensure upgrading works
        AccountMeta::writable(keys[0].public_key()),
        AccountMeta::writable_signer(keys[1].public_key()),
        // Ensure accounts get added
        AccountMeta::writable_signer(keys[4].public_key()),
        AccountMeta::readonly(keys[5].public_key()),
    ];

    let mut tx = SolanaTransaction::new(
        payer.public_key(),
        None,
        vec![
            Instruction::new(program.public_key(), instruction_accounts, data.clone()),
            Instruction::new(program2.public_key(), instruction2_accounts, data2.clone()),
        ],
    );

    tx.sign(&[&payer, &keys[0], &keys[1], &keys[3], &keys[4]])
        .unwrap();

    assert_eq!(tx.signatures.len(), 5);
    let header = tx.message.header();
    assert_eq!(header.required_signatures, 5);
    assert_eq!(header.readonly_signers, 0);
    assert_eq!(header.readonly, 3);

    let message = tx.message.encode();
    assert!(payer.verify(&tx.signatures[0], &message));
    assert!(keys[4].verify(&tx.signatures[1], &message));
    assert!(keys[3].verify(&tx.signatures[2], &message));
    assert!(keys[0].verify(&tx.signatures[3], &message));
    assert!(keys[1].verify(&tx.signatures[4], &message));

    let account_keys = tx.message.account_keys();
    assert_eq!(account_keys[0], payer.public_key());
    assert_eq!(account_keys[1], keys[4].public_key());
    assert_eq!(account_keys[2], keys[3].public_key());
    assert_eq!(account_keys[3], keys[0].public_key());
    assert_eq!(account_keys[4], keys[1].public_key());
    assert_eq!(account_keys[5], keys[2].public_key());
    assert_eq!(account_keys[6], keys[5].public_key());
    assert_eq!(account_keys[7], program2.public_key());
    assert_eq!(account_keys[8], program.public_key());

    // Decode-then-encode stays byte-exact.
    let encoded = tx.encode();
    assert_eq!(SolanaTransaction::decode(&encoded).unwrap().encode(), encoded);
}

// ─── Versioned compilation ───────────────────────────────────────────

#[test]
fn versioned_transaction_compiles_through_lookup_tables() {
    let mut keys = key_pairs(0..8);
    keys.sort_by(|a, b| a.public_key().cmp(&b.public_key()));

    let payer = &keys[0];
    let program = &keys[1];
    let program2 = &keys[2];
    let account_signer = &keys[3];
    let account_readonly = &keys[4];
    let account_readonly2 = &keys[5];
    let account_writable = &keys[6];
    let account_writable2 = &keys[7];

    let blockhash = Hash::new([0x5A; 32]);

    let instruction1 = Instruction::new(
        program.public_key(),
        vec![
            AccountMeta::readonly(account_readonly.public_key()),
            AccountMeta::readonly(account_readonly2.public_key()),
            AccountMeta::readonly(account_writable.public_key()),
            AccountMeta::writable(account_writable2.public_key()),
        ],
        vec![0x01, 0x02, 0x03, 0x04],
    );
    let instruction2 = Instruction::new(
        program2.public_key(),
        vec![
            AccountMeta::writable(account_writable.public_key()),
            AccountMeta::readonly(account_writable.public_key()),
            AccountMeta::readonly(account_readonly.public_key()),
            AccountMeta::readonly_signer(account_signer.public_key()),
        ],
        vec![0x05, 0x06, 0x07, 0x08],
    );

    let table_a = PublicKey::new([0xA1; 32]);
    let table_b = PublicKey::new([0xB7; 32]);

    let lookup_tables = vec![
        AddressLookupTable {
            address: table_b,
            addresses: vec![
                payer.public_key(),
                program.public_key(),
                program2.public_key(),
                account_readonly.public_key(),
                account_readonly2.public_key(),
                account_writable.public_key(),
                account_writable2.public_key(),
            ],
        },
        AddressLookupTable {
            address: table_a,
            addresses: vec![
                account_signer.public_key(),
                account_readonly.public_key(),
                account_readonly.public_key(),
                account_writable.public_key(),
                account_writable.public_key(),
            ],
        },
    ];

    let mut tx = SolanaTransaction::new_v0(
        payer.public_key(),
        Some(blockhash),
        lookup_tables,
        vec![instruction1, instruction2],
    )
    .unwrap();

    tx.sign(&[payer, account_signer]).unwrap();
    assert_eq!(tx.signatures.len(), 2);

    let Message::V0(message) = &tx.message else {
        panic!("expected v0 message");
    };

    assert_eq!(message.static_account_keys.len(), 4);
    assert_eq!(message.address_table_lookups.len(), 2);

    assert_eq!(message.header.required_signatures, 2);
    assert_eq!(message.header.readonly_signers, 1);
    assert_eq!(message.header.readonly, 2);

    assert_eq!(message.recent_blockhash, blockhash);

    let message_data = tx.message.encode();
    assert!(payer.verify(&tx.signatures[0], &message_data));
    assert!(account_signer.verify(&tx.signatures[1], &message_data));

    assert_eq!(message.static_account_keys[0], payer.public_key());
    assert_eq!(message.static_account_keys[1], account_signer.public_key());
    assert_eq!(message.static_account_keys[2], program.public_key());
    assert_eq!(message.static_account_keys[3], program2.public_key());

    let instruction = &message.instructions[0];
    assert_eq!(instruction.program_index, 2);
    assert_eq!(instruction.data, vec![0x01, 0x02, 0x03, 0x04]);
    assert_eq!(instruction.account_indexes, vec![6, 7, 4, 5]);

    let instruction = &message.instructions[1];
    assert_eq!(instruction.program_index, 3);
    assert_eq!(instruction.data, vec![0x05, 0x06, 0x07, 0x08]);
    assert_eq!(instruction.account_indexes, vec![4, 4, 6, 1]);

    // Tables consulted in address order; first occurrence of each account.
    let lookup = &message.address_table_lookups[0];
    assert_eq!(lookup.address, table_a);
    assert_eq!(lookup.writable_indexes, vec![3]);
    assert_eq!(lookup.readonly_indexes, vec![1]);

    let lookup = &message.address_table_lookups[1];
    assert_eq!(lookup.address, table_b);
    assert_eq!(lookup.writable_indexes, vec![6]);
    assert_eq!(lookup.readonly_indexes, vec![4]);

    // Byte-exact round trip of the freshly compiled transaction.
    let encoded = tx.encode();
    assert_eq!(SolanaTransaction::decode(&encoded).unwrap().encode(), encoded);
}
