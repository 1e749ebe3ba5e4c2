use crate::models::NewRecipe;

/// (name, ingredients, instructions)
const RECIPES: [(&str, &str, &str); 15] = [
    (
        "Trứng chiên hành lá",
        "Trứng gà, Hành lá, Nước mắm",
        "Đập trứng vào bát, thêm hành lá và mắm, đánh tan rồi chiên vàng.",
    ),
    (
        "Đậu phụ sốt cà chua",
        "Đậu phụ, Cà chua, Hành lá",
        "Rán vàng đậu phụ. Xào cà chua sệt lại rồi cho đậu vào rim 5 phút.",
    ),
    (
        "Thịt lợn rang cháy cạnh",
        "Thịt lợn, Hành tím, Nước mắm",
        "Thái thịt mỏng, rang cho ra bớt mỡ rồi thêm hành tím và mắm rang khô.",
    ),
    (
        "Rau muống xào tỏi",
        "Rau muống, Tỏi, Dầu ăn",
        "Rau muống luộc sơ. Phi thơm tỏi với dầu ăn rồi cho rau vào xào lửa lớn.",
    ),
    (
        "Canh cà chua trứng",
        "Cà chua, Trứng gà, Hành lá",
        "Xào nhuyễn cà chua, thêm nước sôi. Đổ trứng đã đánh tan vào và rắc hành.",
    ),
    (
        "Sườn xào chua ngọt",
        "Sườn heo, Cà chua, Hành tây",
        "Sườn luộc sơ rồi rán vàng. Sốt cùng cà chua băm và hành tây thái múi.",
    ),
    (
        "Thịt kho tàu",
        "Thịt lợn, Trứng gà, Nước dừa",
        "Kho thịt lợn với trứng gà luộc và nước dừa cho đến khi thịt mềm.",
    ),
    (
        "Canh rau cải thịt băm",
        "Rau cải, Thịt lợn, Gừng",
        "Nấu thịt băm với nước và gừng đập dập, cho rau cải vào khi nước sôi.",
    ),
    (
        "Gà kho gừng",
        "Thịt gà, Gừng, Hành tím",
        "Gà ướp gia vị, kho nhỏ lửa với gừng thái sợi cho đến khi săn chắc.",
    ),
    (
        "Bò xào cần tây",
        "Thịt bò, Cần tây, Hành tây",
        "Xào thịt bò chín tới, sau đó cho cần tây và hành tây vào đảo nhanh tay.",
    ),
    (
        "Cá kho tộ",
        "Cá, Thịt lợn, Hành tím",
        "Kho cá với ít thịt ba chỉ và hành tím cho đến khi nước kho kẹo lại.",
    ),
    (
        "Canh bí đỏ thịt băm",
        "Bí đỏ, Thịt lợn, Hành lá",
        "Hầm bí đỏ với thịt băm cho đến khi bí chín mềm, thêm hành lá.",
    ),
    (
        "Salad cà chua dưa chuột",
        "Cà chua, Dưa chuột, Xà lách",
        "Trộn cà chua, dưa chuột thái lát với xà lách và sốt dầu giấm.",
    ),
    (
        "Salad ức gà áp chảo",
        "Ức gà, Xà lách, Cà chua",
        "Ức gà áp chảo thái lát, ăn kèm xà lách, cà chua và sốt mè rang.",
    ),
    (
        "Salad bơ trứng gà",
        "Bơ, Trứng gà, Xà lách",
        "Bơ và trứng luộc thái miếng, trộn nhẹ với xà lách và sốt mayonnaise.",
    ),
];

pub(crate) fn seed_recipes() -> Vec<NewRecipe<'static>> {
    RECIPES
        .iter()
        .map(|&(name, ingredients_list, instructions)| NewRecipe {
            name,
            ingredients_list,
            instructions,
        })
        .collect()
}
