// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde_json::json;
use tonclient::{
	AppRequestResult, AppRequestResultOk, DecodeError, Error, TaggedUnion,
	config::ClientConfig,
	modules::{
		client::{ParamsOfResolveAppRequest, ResultOfBuildInfo, ResultOfGetApiReference, ResultOfVersion},
		crypto::{
			RegisteredSigningBox, ResultOfFactorize, ResultOfGenerateRandomBytes, ResultOfHash, ResultOfModularPower,
			ResultOfSigningBoxGetPublicKey, ResultOfTonCrc16,
		},
		net::{
			AggregationFn, FieldAggregation, OrderBy, ParamsOfAggregateCollection, ParamsOfQueryCounterparties,
			ParamsOfQueryOperation, ResultOfBatchQuery, ResultOfQueryCollection, ResultOfSubscribeCollection,
		},
		processing::{MessageExpired, ProcessingEvent, ResultOfProcessMessage, ResultOfSendMessage},
		utils::{AddressStringFormat, HexFormat, ParamsOfConvertAddress, ResultOfConvertAddress, ResultOfGetAddressType},
	},
};
use tonclient_codec::{decode, decode_variant, encode};
use tonclient_type::ClientError;

#[test]
fn test_variant_sets_survive_encoding() {
	let operations = vec![
		ParamsOfQueryOperation::AggregateCollection(ParamsOfAggregateCollection {
			collection: "messages".to_string(),
			filter: Some(json!({ "value": { "gt": "0" } })),
			fields: Some(vec![FieldAggregation {
				field: "value".to_string(),
				r#fn: AggregationFn::Max,
			}]),
		}),
		ParamsOfQueryOperation::QueryCounterparties(ParamsOfQueryCounterparties {
			account: "0:1".to_string(),
			result: "counterparty".to_string(),
			first: Some(10),
			after: None,
		}),
	];

	let decoded: Vec<ParamsOfQueryOperation> = decode(&encode(&operations).unwrap()).unwrap();
	assert_eq!(decoded, operations);
}

#[test]
fn test_nested_error_document_survives_encoding() {
	let event = ProcessingEvent::MessageExpired(MessageExpired {
		message_id: "m".to_string(),
		message_dst: "0:1".to_string(),
		message: "te6".to_string(),
		error: ClientError {
			code: Some(409),
			message: "expired".to_string(),
			data: Some(json!({ "waiting_expiration_time": 60 })),
		},
	});

	let decoded: ProcessingEvent = decode(&encode(&event).unwrap()).unwrap();
	assert_eq!(decoded, event);
	assert_eq!(decoded.variant(), "MessageExpired");
}

#[test]
fn test_absent_optionals_are_omitted() {
	let text = encode(&ParamsOfQueryCounterparties {
		account: "0:1".to_string(),
		result: "id".to_string(),
		..Default::default()
	})
	.unwrap();
	assert_eq!(text, r#"{"account":"0:1","result":"id"}"#);
	assert_eq!(encode(&ClientConfig::default()).unwrap(), "{}");
}

#[test]
fn test_missing_discriminator() {
	let err = decode::<AddressStringFormat>(r#"{"url":true}"#).unwrap_err();
	assert!(
		matches!(err, Error::Decode(DecodeError::MissingDiscriminator { ref set }) if set == "AddressStringFormat"),
		"{:?}",
		err
	);
}

#[test]
fn test_concrete_variant_checks_discriminator() {
	assert_eq!(decode_variant::<HexFormat>(r#"{"type":"Hex"}"#).unwrap(), HexFormat {});
	assert_eq!(decode_variant::<HexFormat>("{}").unwrap(), HexFormat {});

	let err = decode_variant::<HexFormat>(r#"{"type":"AccountId"}"#).unwrap_err();
	assert_eq!(err.code(), "DECODE_002");
}

#[test]
fn test_app_result_payload_is_opaque() {
	let result = AppRequestResult::Ok(AppRequestResultOk {
		result: json!({ "type": "Sign", "signature": "00" }),
	});
	let decoded: AppRequestResult = decode(&encode(&result).unwrap()).unwrap();
	assert_eq!(decoded, result);
}

fn assert_empty_document_decodes<T>()
where
	T: DeserializeOwned + Default + PartialEq + Debug,
{
	match decode::<T>("{}") {
		Ok(value) => assert_eq!(value, T::default()),
		Err(err) => panic!("{} rejected an empty document: {:?}", std::any::type_name::<T>(), err),
	}
}

#[test]
fn test_empty_document_decodes_to_defaults() {
	assert_empty_document_decodes::<ResultOfVersion>();
	assert_empty_document_decodes::<ResultOfBuildInfo>();
	assert_empty_document_decodes::<ResultOfGetApiReference>();
	assert_empty_document_decodes::<ClientConfig>();

	assert_empty_document_decodes::<ResultOfHash>();
	assert_empty_document_decodes::<ResultOfFactorize>();
	assert_empty_document_decodes::<ResultOfModularPower>();
	assert_empty_document_decodes::<ResultOfTonCrc16>();
	assert_empty_document_decodes::<ResultOfGenerateRandomBytes>();
	assert_empty_document_decodes::<RegisteredSigningBox>();
	assert_empty_document_decodes::<ResultOfSigningBoxGetPublicKey>();

	assert_empty_document_decodes::<ResultOfConvertAddress>();
	assert_empty_document_decodes::<ResultOfGetAddressType>();
	assert_empty_document_decodes::<ParamsOfConvertAddress>();

	assert_empty_document_decodes::<ResultOfQueryCollection>();
	assert_empty_document_decodes::<ResultOfBatchQuery>();
	assert_empty_document_decodes::<ResultOfSubscribeCollection>();
	assert_empty_document_decodes::<OrderBy>();
	assert_empty_document_decodes::<FieldAggregation>();

	assert_empty_document_decodes::<ResultOfSendMessage>();
	assert_empty_document_decodes::<ResultOfProcessMessage>();
	assert_empty_document_decodes::<ParamsOfResolveAppRequest>();
}

#[test]
fn test_union_defaults_name_a_variant() {
	assert_eq!(AddressStringFormat::default().variant(), "AccountId");
	assert_eq!(AppRequestResult::default().variant(), "Ok");
	assert_eq!(ProcessingEvent::default().variant(), "WillFetchFirstBlock");
	assert_eq!(ParamsOfQueryOperation::default().variant(), "QueryCollection");
}
