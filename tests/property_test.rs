use proptest::prelude::*;
use qrbill::core::reference::{mod10_recursive, qrr_reference};
use qrbill::core::renderer::{plan_for_matrix, DrawOp, Rect, RenderLayout};
use qrbill::domain::model::{ModuleMatrix, PartyBlock, Rgb};
use qrbill::PaymentPayload;

fn matrix_strategy() -> impl Strategy<Value = ModuleMatrix> {
    (1usize..=45).prop_flat_map(|side| {
        proptest::collection::vec(any::<bool>(), side * side)
            .prop_map(move |modules| ModuleMatrix::new(side, modules).unwrap())
    })
}

fn layout_strategy() -> impl Strategy<Value = RenderLayout> {
    (20.0f64..120.0, 0.0f64..0.2, 0.05f64..0.4).prop_map(|(size, quiet, emblem)| {
        let quiet_zone = size * quiet;
        RenderLayout {
            x: 0.0,
            y: 0.0,
            size,
            quiet_zone,
            emblem_size: (size - 2.0 * quiet_zone) * emblem,
        }
    })
}

fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 äöüéàç.,/-]{0,20}"
}

fn party() -> impl Strategy<Value = PartyBlock> {
    (field(), field(), field(), field(), field(), field(), field()).prop_map(
        |(address_type, name, street, building_number, postal_code, town, country)| PartyBlock {
            address_type,
            name,
            street,
            building_number,
            postal_code,
            town,
            country,
        },
    )
}

fn payload_strategy() -> impl Strategy<Value = PaymentPayload> {
    (
        field(),
        party(),
        party(),
        prop_oneof![Just("CHF"), Just("EUR")],
        prop_oneof![Just("0200"), Just("0210")],
        (field(), field(), field(), field()),
    )
        .prop_map(|(account, creditor, debtor, currency, version, (amount, reference, message, info))| {
            PaymentPayload {
                qr_type: "SPC".to_string(),
                version: version.to_string(),
                coding: "1".to_string(),
                account,
                creditor,
                ultimate_creditor: PartyBlock::default(),
                amount,
                currency: currency.to_string(),
                debtor,
                reference_type: "NON".to_string(),
                reference,
                message,
                bill_information: info,
                alternative_scheme_1: String::new(),
                alternative_scheme_2: String::new(),
            }
        })
}

proptest! {
    #[test]
    fn dark_modules_are_drawn_whole_or_skipped_whole(
        matrix in matrix_strategy(),
        layout in layout_strategy(),
    ) {
        let ops = plan_for_matrix(&matrix, &layout, Rgb::BLACK, Rgb::WHITE);
        let emblem = layout.emblem_rect();
        let side = matrix.side();
        let module_size = (layout.size - 2.0 * layout.quiet_zone) / side as f64;

        let drawn: Vec<Rect> = ops[3..ops.len() - 4]
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(rect) => Some(*rect),
                DrawOp::SetFillColor(_) => None,
            })
            .collect();

        // 徽章邊界直接由版面計算
        let emblem_lo = (layout.size - layout.emblem_size) / 2.0;
        let emblem_hi = emblem_lo + layout.emblem_size;
        let inside_emblem = |r: &Rect| {
            r.x >= emblem_lo
                && r.y >= emblem_lo
                && r.x + r.width <= emblem_hi
                && r.y + r.height <= emblem_hi
        };

        let mut remaining = drawn.iter().peekable();
        for row in 0..side {
            for col in 0..side {
                if !matrix.is_dark(row, col) {
                    continue;
                }
                let module = Rect {
                    x: layout.quiet_zone + col as f64 * module_size,
                    y: layout.quiet_zone + row as f64 * module_size,
                    width: module_size,
                    height: module_size,
                };
                if remaining.peek() == Some(&&module) {
                    remaining.next();
                    prop_assert!(!inside_emblem(&module));
                } else {
                    // 被略過的深色模組必須完全落在徽章內
                    prop_assert!(inside_emblem(&module), "skipped module {:?} outside emblem", module);
                }
            }
        }
        prop_assert!(remaining.next().is_none());

        for rect in &drawn {
            prop_assert_eq!(rect.width, module_size);
            prop_assert_eq!(rect.height, module_size);
        }
        prop_assert_eq!(ops[ops.len() - 4], DrawOp::FillRect(emblem));
    }

    #[test]
    fn serialized_payload_splits_back_into_fields(payload in payload_strategy()) {
        let text = payload.to_wire().unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        prop_assert_eq!(lines.len(), 33);
        prop_assert_eq!(&lines, &payload.fields());
        prop_assert_eq!(PaymentPayload::parse(&text).unwrap(), payload.clone());
    }

    #[test]
    fn qrr_reference_is_27_digits_with_valid_check(
        invoice in "[A-Z0-9-]{0,40}",
        day in 1u32..=28,
        month in 1u32..=12,
        year in 2000i32..2100,
    ) {
        let date = chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let reference = qrr_reference(&invoice, date);
        prop_assert_eq!(reference.len(), 27);
        prop_assert!(reference.chars().all(|c| c.is_ascii_digit()));
        let check = mod10_recursive(&reference[..26]).unwrap();
        prop_assert_eq!(reference[26..].parse::<u8>().unwrap(), check);
    }
}
